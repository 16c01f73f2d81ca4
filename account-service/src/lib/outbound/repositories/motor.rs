use async_trait::async_trait;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::account::models::AccountId;
use crate::domain::motor::errors::MotorError;
use crate::domain::motor::models::AddMotorCommand;
use crate::domain::motor::models::Motor;
use crate::domain::motor::models::MotorId;
use crate::domain::motor::models::MotorImage;
use crate::domain::motor::models::MotorImageId;
use crate::domain::motor::ports::MotorRepository;

pub struct PostgresMotorRepository {
    pool: PgPool,
}

impl PostgresMotorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct MotorRow {
    id: i64,
    account_id: i64,
    image_id: Option<i64>,
    model: String,
    year: i32,
    mileage: i32,
    province: String,
    engine_size: i32,
    predicted_price: i64,
    min_price: i64,
    max_price: i64,
}

impl From<MotorRow> for Motor {
    fn from(row: MotorRow) -> Self {
        Motor {
            id: MotorId(row.id),
            account_id: AccountId(row.account_id),
            image_id: row.image_id.map(MotorImageId),
            model: row.model,
            year: row.year,
            mileage: row.mileage,
            province: row.province,
            engine_size: row.engine_size,
            predicted_price: row.predicted_price,
            min_price: row.min_price,
            max_price: row.max_price,
        }
    }
}

#[derive(FromRow)]
struct MotorImageRow {
    id: i64,
    account_id: i64,
    filename: String,
    predicted_model: String,
}

impl From<MotorImageRow> for MotorImage {
    fn from(row: MotorImageRow) -> Self {
        MotorImage {
            id: MotorImageId(row.id),
            account_id: AccountId(row.account_id),
            filename: row.filename,
            predicted_model: row.predicted_model,
        }
    }
}

const MOTOR_COLUMNS: &str = "id, account_id, image_id, model, year, mileage, province, \
                             engine_size, predicted_price, min_price, max_price";

#[async_trait]
impl MotorRepository for PostgresMotorRepository {
    async fn insert_motor(
        &self,
        account_id: &AccountId,
        command: AddMotorCommand,
    ) -> Result<Motor, MotorError> {
        let row = sqlx::query_as::<_, MotorRow>(&format!(
            r#"
            INSERT INTO motors
                (account_id, image_id, model, year, mileage, province,
                 engine_size, predicted_price, min_price, max_price)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {MOTOR_COLUMNS}
            "#
        ))
        .bind(account_id.0)
        .bind(command.image_id.map(|id| id.0))
        .bind(&command.model)
        .bind(command.year)
        .bind(command.mileage)
        .bind(&command.province)
        .bind(command.engine_size)
        .bind(command.predicted_price)
        .bind(command.min_price)
        .bind(command.max_price)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| MotorError::DatabaseError(e.to_string()))?;

        Ok(row.into())
    }

    async fn list_for_account(&self, account_id: &AccountId) -> Result<Vec<Motor>, MotorError> {
        let rows = sqlx::query_as::<_, MotorRow>(&format!(
            r#"
            SELECT {MOTOR_COLUMNS}
            FROM motors
            WHERE account_id = $1
            ORDER BY id DESC
            "#
        ))
        .bind(account_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| MotorError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Motor::from).collect())
    }

    async fn find_motor(&self, id: &MotorId) -> Result<Option<Motor>, MotorError> {
        let row = sqlx::query_as::<_, MotorRow>(&format!(
            r#"
            SELECT {MOTOR_COLUMNS}
            FROM motors
            WHERE id = $1
            "#
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| MotorError::DatabaseError(e.to_string()))?;

        Ok(row.map(Motor::from))
    }

    async fn delete_motor(&self, id: &MotorId) -> Result<(), MotorError> {
        let result = sqlx::query(
            r#"
            DELETE FROM motors
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| MotorError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(MotorError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn insert_image(
        &self,
        account_id: &AccountId,
        filename: &str,
        predicted_model: &str,
    ) -> Result<MotorImage, MotorError> {
        let row = sqlx::query_as::<_, MotorImageRow>(
            r#"
            INSERT INTO motor_images (account_id, filename, predicted_model)
            VALUES ($1, $2, $3)
            RETURNING id, account_id, filename, predicted_model
            "#,
        )
        .bind(account_id.0)
        .bind(filename)
        .bind(predicted_model)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| MotorError::DatabaseError(e.to_string()))?;

        Ok(row.into())
    }

    async fn find_image(&self, id: &MotorImageId) -> Result<Option<MotorImage>, MotorError> {
        let row = sqlx::query_as::<_, MotorImageRow>(
            r#"
            SELECT id, account_id, filename, predicted_model
            FROM motor_images
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| MotorError::DatabaseError(e.to_string()))?;

        Ok(row.map(MotorImage::from))
    }
}
