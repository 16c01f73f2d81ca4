use async_trait::async_trait;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::NewAccount;
use crate::domain::account::models::RegisterAccountCommand;
use crate::domain::account::models::UpdateAccountCommand;

/// Port for account domain service operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account with validated credentials.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterAccountCommand) -> Result<Account, AccountError>;

    /// Retrieve an account by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get(&self, id: &AccountId) -> Result<Account, AccountError>;

    /// Retrieve an account by email address.
    ///
    /// # Errors
    /// * `NotFound` - No account with this email
    /// * `DatabaseError` - Database operation failed
    async fn get_by_email(&self, email: &EmailAddress) -> Result<Account, AccountError>;

    /// Update an existing account with optional fields.
    ///
    /// A new password is re-hashed before storage.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update(
        &self,
        id: &AccountId,
        command: UpdateAccountCommand,
    ) -> Result<Account, AccountError>;

    /// Replace the profile photo.
    ///
    /// Uploads the new object under a fresh random name, persists it, then
    /// removes the superseded object best-effort.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `UnsupportedImageType` - Content type has no known extension
    /// * `Storage` - Object upload failed
    async fn update_photo(
        &self,
        id: &AccountId,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<Account, AccountError>;

    /// Delete an account. Owned rows (reset tokens, motors, images) go with
    /// it via foreign keys.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &AccountId) -> Result<(), AccountError>;
}

/// Persistence operations for the account aggregate.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist a new account; the store assigns id and creation time.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, account: NewAccount) -> Result<Account, AccountError>;

    /// Retrieve an account by identifier.
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;

    /// Retrieve an account by email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError>;

    /// Update an existing account in storage.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, account: Account) -> Result<Account, AccountError>;

    /// Remove an account from storage.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &AccountId) -> Result<(), AccountError>;
}
