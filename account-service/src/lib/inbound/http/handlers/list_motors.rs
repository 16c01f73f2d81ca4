use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::create_motor::MotorData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::motor::ports::MotorServicePort;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

pub async fn list_motors(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedAccount>,
) -> Result<ApiSuccess<ListMotorsResponseData>, ApiError> {
    let motors = state
        .motor_service
        .list_motors(&auth.account_id)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ListMotorsResponseData {
            motors: motors.iter().map(MotorData::from).collect(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListMotorsResponseData {
    pub motors: Vec<MotorData>,
}
