use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::motor::models::MotorId;
use crate::domain::motor::ports::MotorServicePort;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

pub async fn delete_motor(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedAccount>,
    Path(motor_id): Path<i64>,
) -> Result<ApiSuccess<()>, ApiError> {
    state
        .motor_service
        .delete_motor(&auth.account_id, &MotorId(motor_id))
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::NO_CONTENT, ()))
}
