use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::motor::models::AddMotorCommand;
use crate::domain::motor::models::Motor;
use crate::domain::motor::models::MotorImageId;
use crate::domain::motor::ports::MotorServicePort;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

pub async fn create_motor(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedAccount>,
    Json(body): Json<CreateMotorRequest>,
) -> Result<ApiSuccess<MotorData>, ApiError> {
    state
        .motor_service
        .add_motor(&auth.account_id, body.into_command())
        .await
        .map_err(ApiError::from)
        .map(|ref motor| ApiSuccess::new(StatusCode::CREATED, motor.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateMotorRequest {
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

impl CreateMotorRequest {
    fn into_command(self) -> AddMotorCommand {
        AddMotorCommand {
            image_id: self.image_id.map(MotorImageId),
            model: self.model,
            year: self.year,
            mileage: self.mileage,
            province: self.province,
            engine_size: self.engine_size,
            predicted_price: self.predicted_price,
            min_price: self.min_price,
            max_price: self.max_price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MotorData {
    pub id: i64,
    pub image_id: Option<i64>,
    pub model: String,
    pub year: i32,
    pub mileage: i32,
    pub province: String,
    pub engine_size: i32,
    pub predicted_price: i64,
    pub min_price: i64,
    pub max_price: i64,
}

impl From<&Motor> for MotorData {
    fn from(motor: &Motor) -> Self {
        Self {
            id: motor.id.0,
            image_id: motor.image_id.map(|id| id.0),
            model: motor.model.clone(),
            year: motor.year,
            mileage: motor.mileage,
            province: motor.province.clone(),
            engine_size: motor.engine_size,
            predicted_price: motor.predicted_price,
            min_price: motor.min_price,
            max_price: motor.max_price,
        }
    }
}
