use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::account::models::AccountId;
use crate::domain::motor::errors::MotorError;
use crate::domain::motor::models::AddMotorCommand;
use crate::domain::motor::models::Motor;
use crate::domain::motor::models::MotorId;
use crate::domain::motor::models::MotorImage;
use crate::domain::motor::ports::MotorRepository;
use crate::domain::motor::ports::MotorServicePort;

/// Domain service for motor and motor-image bookkeeping.
pub struct MotorService<MR>
where
    MR: MotorRepository,
{
    repository: Arc<MR>,
}

impl<MR> MotorService<MR>
where
    MR: MotorRepository,
{
    pub fn new(repository: Arc<MR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<MR> MotorServicePort for MotorService<MR>
where
    MR: MotorRepository,
{
    async fn add_motor(
        &self,
        account_id: &AccountId,
        command: AddMotorCommand,
    ) -> Result<Motor, MotorError> {
        // A referenced image must exist and belong to the same account;
        // a foreign image reads as missing.
        if let Some(image_id) = &command.image_id {
            let image = self
                .repository
                .find_image(image_id)
                .await?
                .filter(|image| image.account_id == *account_id);
            if image.is_none() {
                return Err(MotorError::ImageNotFound(image_id.to_string()));
            }
        }

        self.repository.insert_motor(account_id, command).await
    }

    async fn list_motors(&self, account_id: &AccountId) -> Result<Vec<Motor>, MotorError> {
        self.repository.list_for_account(account_id).await
    }

    async fn delete_motor(&self, account_id: &AccountId, id: &MotorId) -> Result<(), MotorError> {
        let motor = self
            .repository
            .find_motor(id)
            .await?
            .filter(|motor| motor.account_id == *account_id)
            .ok_or(MotorError::NotFound(id.to_string()))?;

        self.repository.delete_motor(&motor.id).await
    }

    async fn record_image(
        &self,
        account_id: &AccountId,
        filename: String,
        predicted_model: String,
    ) -> Result<MotorImage, MotorError> {
        self.repository
            .insert_image(account_id, &filename, &predicted_model)
            .await
    }
}
