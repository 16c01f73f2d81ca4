use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::NewAccount;
use crate::domain::account::models::RegisterAccountCommand;
use crate::domain::account::models::UpdateAccountCommand;
use crate::domain::account::ports::AccountRepository;
use crate::domain::account::ports::AccountServicePort;
use crate::domain::storage::extension_for_mime;
use crate::domain::storage::random_object_name;
use crate::domain::storage::ObjectStore;

const PHOTO_NAME_LENGTH: usize = 30;

/// Domain service implementation for account operations.
///
/// Concrete implementation of AccountServicePort with dependency injection.
pub struct AccountService<AR, OS>
where
    AR: AccountRepository,
    OS: ObjectStore,
{
    repository: Arc<AR>,
    store: Arc<OS>,
    password_hasher: auth::PasswordHasher,
}

impl<AR, OS> AccountService<AR, OS>
where
    AR: AccountRepository,
    OS: ObjectStore,
{
    /// Create a new account service with injected dependencies.
    pub fn new(repository: Arc<AR>, store: Arc<OS>) -> Self {
        Self {
            repository,
            store,
            password_hasher: auth::PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl<AR, OS> AccountServicePort for AccountService<AR, OS>
where
    AR: AccountRepository,
    OS: ObjectStore,
{
    async fn register(&self, command: RegisterAccountCommand) -> Result<Account, AccountError> {
        let password_hash = self
            .password_hasher
            .hash(&command.password)
            .map_err(|e| AccountError::Unknown(format!("Password hashing failed: {}", e)))?;

        let account = NewAccount {
            email: command.email,
            username: command.username,
            name: command.name,
            password_hash,
        };

        self.repository.create(account).await
    }

    async fn get(&self, id: &AccountId) -> Result<Account, AccountError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound(id.to_string()))
    }

    async fn get_by_email(&self, email: &EmailAddress) -> Result<Account, AccountError> {
        self.repository
            .find_by_email(email.as_str())
            .await?
            .ok_or(AccountError::NotFound(email.to_string()))
    }

    async fn update(
        &self,
        id: &AccountId,
        command: UpdateAccountCommand,
    ) -> Result<Account, AccountError> {
        let mut account = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound(id.to_string()))?;

        if let Some(new_email) = command.email {
            account.email = new_email;
        }

        if let Some(new_name) = command.name {
            account.name = new_name;
        }

        if let Some(new_password) = command.password {
            account.password_hash = self
                .password_hasher
                .hash(&new_password)
                .map_err(|e| AccountError::Unknown(format!("Password hashing failed: {}", e)))?;
        }

        self.repository.update(account).await
    }

    async fn update_photo(
        &self,
        id: &AccountId,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<Account, AccountError> {
        let extension = extension_for_mime(content_type)
            .ok_or_else(|| AccountError::UnsupportedImageType(content_type.to_string()))?;

        let mut account = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound(id.to_string()))?;

        let filename = format!("{}{}", random_object_name(PHOTO_NAME_LENGTH), extension);

        self.store
            .put(&filename, bytes, content_type)
            .await
            .map_err(|e| AccountError::Storage(e.to_string()))?;

        let superseded = account.photo.replace(filename);
        let account = self.repository.update(account).await?;

        // Best-effort: the row already points at the new object.
        if let Some(old) = superseded {
            if let Err(e) = self.store.delete(&old).await {
                tracing::warn!(object = %old, error = %e, "Failed to delete superseded photo");
            }
        }

        Ok(account)
    }

    async fn delete(&self, id: &AccountId) -> Result<(), AccountError> {
        self.repository.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::account::models::Username;
    use crate::domain::storage::StorageError;

    mock! {
        pub TestAccountRepository {}

        #[async_trait]
        impl AccountRepository for TestAccountRepository {
            async fn create(&self, account: NewAccount) -> Result<Account, AccountError>;
            async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError>;
            async fn update(&self, account: Account) -> Result<Account, AccountError>;
            async fn delete(&self, id: &AccountId) -> Result<(), AccountError>;
        }
    }

    mock! {
        pub TestObjectStore {}

        #[async_trait]
        impl ObjectStore for TestObjectStore {
            async fn put(&self, name: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), StorageError>;
            async fn delete(&self, name: &str) -> Result<(), StorageError>;
            fn public_url(&self, name: &str) -> String;
        }
    }

    fn account(id: i64) -> Account {
        Account {
            id: AccountId(id),
            email: EmailAddress::new("rider@example.com".to_string()).unwrap(),
            username: Username::new("rider".to_string()).unwrap(),
            name: "Rider".to_string(),
            password_hash: "$2b$12$test_hash".to_string(),
            photo: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let mut repository = MockTestAccountRepository::new();
        let store = MockTestObjectStore::new();

        repository
            .expect_create()
            .withf(|new| {
                new.email.as_str() == "rider@example.com"
                    && new.username.as_str() == "rider"
                    && new.password_hash.starts_with("$2")
                    && new.password_hash != "pass_word!"
            })
            .times(1)
            .returning(|new| {
                Ok(Account {
                    id: AccountId(1),
                    email: new.email,
                    username: new.username,
                    name: new.name,
                    password_hash: new.password_hash,
                    photo: None,
                    created_at: Utc::now(),
                })
            });

        let service = AccountService::new(Arc::new(repository), Arc::new(store));

        let command = RegisterAccountCommand {
            email: EmailAddress::new("rider@example.com".to_string()).unwrap(),
            username: Username::new("rider".to_string()).unwrap(),
            name: "Rider".to_string(),
            password: "pass_word!".to_string(),
        };

        let created = service.register(command).await.unwrap();
        assert_eq!(created.id, AccountId(1));
        assert!(created.password_hash.starts_with("$2"));
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut repository = MockTestAccountRepository::new();
        let store = MockTestObjectStore::new();

        repository.expect_create().times(1).returning(|new| {
            Err(AccountError::EmailAlreadyExists(
                new.email.as_str().to_string(),
            ))
        });

        let service = AccountService::new(Arc::new(repository), Arc::new(store));

        let command = RegisterAccountCommand {
            email: EmailAddress::new("rider@example.com".to_string()).unwrap(),
            username: Username::new("rider".to_string()).unwrap(),
            name: "Rider".to_string(),
            password: "pass_word!".to_string(),
        };

        let result = service.register(command).await;
        assert!(matches!(result, Err(AccountError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let mut repository = MockTestAccountRepository::new();
        let store = MockTestObjectStore::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = AccountService::new(Arc::new(repository), Arc::new(store));

        let result = service.get(&AccountId(99)).await;
        assert!(matches!(result, Err(AccountError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_rehashes_password() {
        let mut repository = MockTestAccountRepository::new();
        let store = MockTestObjectStore::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(account(1))));

        repository
            .expect_update()
            .withf(|acc| {
                acc.name == "New Name"
                    && acc.password_hash.starts_with("$2")
                    && acc.password_hash != "$2b$12$test_hash"
            })
            .times(1)
            .returning(|acc| Ok(acc));

        let service = AccountService::new(Arc::new(repository), Arc::new(store));

        let command = UpdateAccountCommand {
            email: None,
            name: Some("New Name".to_string()),
            password: Some("new_password".to_string()),
        };

        let updated = service.update(&AccountId(1), command).await.unwrap();
        assert_eq!(updated.name, "New Name");
    }

    #[tokio::test]
    async fn test_update_photo_uploads_then_deletes_superseded() {
        let mut repository = MockTestAccountRepository::new();
        let mut store = MockTestObjectStore::new();

        let mut existing = account(1);
        existing.photo = Some("oldphoto.jpg".to_string());

        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));

        store
            .expect_put()
            .withf(|name, bytes, content_type| {
                name.ends_with(".png") && !bytes.is_empty() && content_type == "image/png"
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        repository
            .expect_update()
            .withf(|acc| {
                let photo = acc.photo.as_deref().unwrap();
                photo.ends_with(".png") && photo.len() == PHOTO_NAME_LENGTH + ".png".len()
            })
            .times(1)
            .returning(|acc| Ok(acc));

        store
            .expect_delete()
            .with(eq("oldphoto.jpg"))
            .times(1)
            .returning(|_| Ok(()));

        let service = AccountService::new(Arc::new(repository), Arc::new(store));

        let updated = service
            .update_photo(&AccountId(1), "image/png", vec![1, 2, 3])
            .await
            .unwrap();
        assert!(updated.photo.unwrap().ends_with(".png"));
    }

    #[tokio::test]
    async fn test_update_photo_rejects_unknown_content_type() {
        let repository = MockTestAccountRepository::new();
        let store = MockTestObjectStore::new();

        let service = AccountService::new(Arc::new(repository), Arc::new(store));

        let result = service
            .update_photo(&AccountId(1), "application/pdf", vec![1])
            .await;
        assert!(matches!(result, Err(AccountError::UnsupportedImageType(_))));
    }

    #[tokio::test]
    async fn test_delete_passthrough() {
        let mut repository = MockTestAccountRepository::new();
        let store = MockTestObjectStore::new();

        repository
            .expect_delete()
            .withf(|id| *id == AccountId(1))
            .times(1)
            .returning(|_| Ok(()));

        let service = AccountService::new(Arc::new(repository), Arc::new(store));
        assert!(service.delete(&AccountId(1)).await.is_ok());
    }
}
