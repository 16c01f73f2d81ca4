use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::reset::models::ResetTokenId;
use crate::domain::reset::ports::ResetServicePort;
use crate::inbound::http::router::AppState;

/// Complete the reset workflow: set the new password and burn every
/// outstanding token of the account.
pub async fn reset_password(
    State(state): State<AppState>,
    Path(token_id): Path<String>,
    Json(body): Json<ResetPasswordRequestBody>,
) -> Result<ApiSuccess<ResetPasswordResponseData>, ApiError> {
    let token_id = ResetTokenId::from_string(&token_id)
        .map_err(|_| ApiError::NotFound("Reset token or account not found".to_string()))?;

    state
        .reset_service
        .consume(&token_id, &body.new_password)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ResetPasswordResponseData {
            message: "Password updated".to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResetPasswordRequestBody {
    new_password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResetPasswordResponseData {
    pub message: String,
}
