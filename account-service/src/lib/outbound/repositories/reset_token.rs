use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::account::models::AccountId;
use crate::domain::reset::errors::ResetError;
use crate::domain::reset::models::ResetToken;
use crate::domain::reset::models::ResetTokenId;
use crate::domain::reset::ports::ResetTokenRepository;

pub struct PostgresResetTokenRepository {
    pool: PgPool,
}

impl PostgresResetTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ResetTokenRow {
    id: Uuid,
    account_id: i64,
    expires_at: DateTime<Utc>,
}

impl From<ResetTokenRow> for ResetToken {
    fn from(row: ResetTokenRow) -> Self {
        ResetToken {
            id: ResetTokenId(row.id),
            account_id: AccountId(row.account_id),
            expires_at: row.expires_at,
        }
    }
}

#[async_trait]
impl ResetTokenRepository for PostgresResetTokenRepository {
    async fn create(
        &self,
        token: ResetToken,
        cooldown_cutoff: DateTime<Utc>,
    ) -> Result<ResetToken, ResetError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| ResetError::DatabaseError(e.to_string()))?;

        // Serializes check-then-insert per account: the lock is released at
        // commit, so two concurrent requests for one account run in turn
        // and the loser sees the winner's row.
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(token.account_id.0)
            .execute(&mut *tx)
            .await
            .map_err(|e| ResetError::DatabaseError(e.to_string()))?;

        let result = sqlx::query(
            r#"
            INSERT INTO password_reset_tokens (id, account_id, expires_at)
            SELECT $1, $2, $3
            WHERE NOT EXISTS (
                SELECT 1 FROM password_reset_tokens
                WHERE account_id = $2 AND expires_at > $4
            )
            "#,
        )
        .bind(token.id.0)
        .bind(token.account_id.0)
        .bind(token.expires_at)
        .bind(cooldown_cutoff)
        .execute(&mut *tx)
        .await
        .map_err(|e| ResetError::DatabaseError(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| ResetError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ResetError::Cooldown);
        }

        Ok(token)
    }

    async fn find_by_id(&self, id: &ResetTokenId) -> Result<Option<ResetToken>, ResetError> {
        let row = sqlx::query_as::<_, ResetTokenRow>(
            r#"
            SELECT id, account_id, expires_at
            FROM password_reset_tokens
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ResetError::DatabaseError(e.to_string()))?;

        Ok(row.map(ResetToken::from))
    }

    async fn most_recent_for_account(
        &self,
        account_id: &AccountId,
    ) -> Result<Option<ResetToken>, ResetError> {
        let row = sqlx::query_as::<_, ResetTokenRow>(
            r#"
            SELECT id, account_id, expires_at
            FROM password_reset_tokens
            WHERE account_id = $1
            ORDER BY expires_at DESC
            LIMIT 1
            "#,
        )
        .bind(account_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ResetError::DatabaseError(e.to_string()))?;

        Ok(row.map(ResetToken::from))
    }

    async fn consume_for_account(
        &self,
        account_id: &AccountId,
        password_hash: &str,
    ) -> Result<(), ResetError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| ResetError::DatabaseError(e.to_string()))?;

        let updated = sqlx::query(
            r#"
            UPDATE accounts
            SET password_hash = $2
            WHERE id = $1
            "#,
        )
        .bind(account_id.0)
        .bind(password_hash)
        .execute(&mut *tx)
        .await
        .map_err(|e| ResetError::DatabaseError(e.to_string()))?;

        if updated.rows_affected() == 0 {
            // Account vanished between resolution and consumption; nothing
            // is committed.
            return Err(ResetError::NotFound);
        }

        sqlx::query(
            r#"
            DELETE FROM password_reset_tokens
            WHERE account_id = $1
            "#,
        )
        .bind(account_id.0)
        .execute(&mut *tx)
        .await
        .map_err(|e| ResetError::DatabaseError(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| ResetError::DatabaseError(e.to_string()))
    }
}
