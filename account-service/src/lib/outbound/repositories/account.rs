use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::NewAccount;
use crate::domain::account::models::Username;
use crate::domain::account::ports::AccountRepository;

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct AccountRow {
    id: i64,
    email: String,
    username: String,
    name: String,
    password_hash: String,
    photo: Option<String>,
    created_at: DateTime<Utc>,
}

impl AccountRow {
    fn try_into_account(self) -> Result<Account, AccountError> {
        Ok(Account {
            id: AccountId(self.id),
            email: EmailAddress::new(self.email)?,
            username: Username::new(self.username)?,
            name: self.name,
            password_hash: self.password_hash,
            photo: self.photo,
            created_at: self.created_at,
        })
    }
}

fn map_unique_violation(e: sqlx::Error, email: &str, username: &str) -> AccountError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            if db_err.constraint() == Some("accounts_email_key") {
                return AccountError::EmailAlreadyExists(email.to_string());
            }
            if db_err.constraint() == Some("accounts_username_key") {
                return AccountError::UsernameAlreadyExists(username.to_string());
            }
        }
    }
    AccountError::DatabaseError(e.to_string())
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create(&self, account: NewAccount) -> Result<Account, AccountError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            INSERT INTO accounts (email, username, name, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, username, name, password_hash, photo, created_at
            "#,
        )
        .bind(account.email.as_str())
        .bind(account.username.as_str())
        .bind(&account.name)
        .bind(&account.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, account.email.as_str(), account.username.as_str())
        })?;

        row.try_into_account()
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, email, username, name, password_hash, photo, created_at
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(AccountRow::try_into_account).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, email, username, name, password_hash, photo, created_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(AccountRow::try_into_account).transpose()
    }

    async fn update(&self, account: Account) -> Result<Account, AccountError> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET email = $2, name = $3, password_hash = $4, photo = $5
            WHERE id = $1
            "#,
        )
        .bind(account.id.0)
        .bind(account.email.as_str())
        .bind(&account.name)
        .bind(&account.password_hash)
        .bind(account.photo.as_deref())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, account.email.as_str(), account.username.as_str())
        })?;

        if result.rows_affected() == 0 {
            return Err(AccountError::NotFound(account.id.to_string()));
        }

        Ok(account)
    }

    async fn delete(&self, id: &AccountId) -> Result<(), AccountError> {
        let result = sqlx::query(
            r#"
            DELETE FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AccountError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
