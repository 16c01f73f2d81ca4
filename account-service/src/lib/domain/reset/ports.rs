use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::reset::errors::MailerError;
use crate::domain::reset::errors::ResetError;
use crate::domain::reset::models::ResetToken;
use crate::domain::reset::models::ResetTokenId;

/// Port for the password-reset workflow.
#[async_trait]
pub trait ResetServicePort: Send + Sync + 'static {
    /// Issue a reset token for the account owning `email` and mail the
    /// reset link.
    ///
    /// # Errors
    /// * `NotFound` - No account with this email
    /// * `Cooldown` - A token was issued within the cooldown window
    /// * `Mailer` - The reset mail could not be sent (the token stands)
    /// * `DatabaseError` - Database operation failed
    async fn request(&self, email: &str) -> Result<ResetToken, ResetError>;

    /// Resolve a token for displaying the reset form.
    ///
    /// Succeeds only for an unexpired token that is the most-recent live
    /// token of its account; every failure is `NotFound`.
    async fn resolve(&self, token_id: &ResetTokenId) -> Result<Account, ResetError>;

    /// Complete a reset: set the new password and invalidate every
    /// outstanding token of the account in one atomic unit.
    ///
    /// # Errors
    /// * `NotFound` - Token unknown or expired, or account gone
    /// * `PolicyViolation` - New password equals the account email
    /// * `DatabaseError` - Database operation failed
    async fn consume(&self, token_id: &ResetTokenId, new_password: &str)
        -> Result<(), ResetError>;
}

/// Persistence operations for reset tokens.
///
/// Implementations must make `create` behave as if the cooldown check and
/// the insert were serialized per account: when a concurrent request wins
/// the race, the loser surfaces `Cooldown` rather than inserting a
/// duplicate.
#[async_trait]
pub trait ResetTokenRepository: Send + Sync + 'static {
    /// Insert a token unless the account already holds one issued within
    /// the cooldown window.
    ///
    /// `cooldown_cutoff` marks the boundary: an existing token with
    /// `expires_at > cooldown_cutoff` was issued inside the window and
    /// blocks the insert.
    ///
    /// # Errors
    /// * `Cooldown` - A blocking token exists (or won a concurrent race)
    /// * `DatabaseError` - Database operation failed
    async fn create(
        &self,
        token: ResetToken,
        cooldown_cutoff: DateTime<Utc>,
    ) -> Result<ResetToken, ResetError>;

    /// Retrieve a token by identifier.
    async fn find_by_id(&self, id: &ResetTokenId) -> Result<Option<ResetToken>, ResetError>;

    /// The account's most recent token, ordered by latest `expires_at`.
    ///
    /// Expiry time is the ordering key (not insertion order): creation time
    /// is not stored, and the two orderings agree only up to clock skew.
    async fn most_recent_for_account(
        &self,
        account_id: &AccountId,
    ) -> Result<Option<ResetToken>, ResetError>;

    /// Atomically set the account's password hash and delete every reset
    /// token belonging to it. Partial application must be impossible.
    ///
    /// # Errors
    /// * `NotFound` - Account row no longer exists
    /// * `DatabaseError` - Database operation failed
    async fn consume_for_account(
        &self,
        account_id: &AccountId,
        password_hash: &str,
    ) -> Result<(), ResetError>;
}

/// Outbound mail collaborator for reset links.
#[async_trait]
pub trait ResetMailer: Send + Sync + 'static {
    /// Send the reset link for `token_id` to `recipient`.
    async fn send_reset_link(
        &self,
        recipient: &str,
        token_id: &ResetTokenId,
    ) -> Result<(), MailerError>;
}
