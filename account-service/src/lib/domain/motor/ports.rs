use async_trait::async_trait;

use crate::domain::account::models::AccountId;
use crate::domain::motor::errors::MotorError;
use crate::domain::motor::models::AddMotorCommand;
use crate::domain::motor::models::Motor;
use crate::domain::motor::models::MotorId;
use crate::domain::motor::models::MotorImage;
use crate::domain::motor::models::MotorImageId;

/// Port for motor bookkeeping operations.
#[async_trait]
pub trait MotorServicePort: Send + Sync + 'static {
    /// Record a motor for an account.
    ///
    /// # Errors
    /// * `ImageNotFound` - Referenced image does not exist or belongs to a
    ///   different account
    /// * `DatabaseError` - Database operation failed
    async fn add_motor(
        &self,
        account_id: &AccountId,
        command: AddMotorCommand,
    ) -> Result<Motor, MotorError>;

    /// List the account's motors.
    async fn list_motors(&self, account_id: &AccountId) -> Result<Vec<Motor>, MotorError>;

    /// Delete a motor owned by the account.
    ///
    /// # Errors
    /// * `NotFound` - Motor does not exist or belongs to a different account
    async fn delete_motor(&self, account_id: &AccountId, id: &MotorId) -> Result<(), MotorError>;

    /// Record an uploaded image and the model classified in it.
    async fn record_image(
        &self,
        account_id: &AccountId,
        filename: String,
        predicted_model: String,
    ) -> Result<MotorImage, MotorError>;
}

/// Persistence operations for motors and motor images.
#[async_trait]
pub trait MotorRepository: Send + Sync + 'static {
    async fn insert_motor(
        &self,
        account_id: &AccountId,
        command: AddMotorCommand,
    ) -> Result<Motor, MotorError>;

    async fn list_for_account(&self, account_id: &AccountId) -> Result<Vec<Motor>, MotorError>;

    async fn find_motor(&self, id: &MotorId) -> Result<Option<Motor>, MotorError>;

    async fn delete_motor(&self, id: &MotorId) -> Result<(), MotorError>;

    async fn insert_image(
        &self,
        account_id: &AccountId,
        filename: &str,
        predicted_model: &str,
    ) -> Result<MotorImage, MotorError>;

    async fn find_image(&self, id: &MotorImageId) -> Result<Option<MotorImage>, MotorError>;
}
