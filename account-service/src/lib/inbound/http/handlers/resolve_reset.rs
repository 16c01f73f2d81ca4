use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::reset::models::ResetTokenId;
use crate::domain::reset::ports::ResetServicePort;
use crate::inbound::http::router::AppState;

/// Resolve a reset link for displaying the reset form.
pub async fn resolve_reset(
    State(state): State<AppState>,
    Path(token_id): Path<String>,
) -> Result<ApiSuccess<ResolveResetResponseData>, ApiError> {
    // A syntactically invalid token reads the same as an unknown one.
    let token_id = ResetTokenId::from_string(&token_id)
        .map_err(|_| ApiError::NotFound("Reset token or account not found".to_string()))?;

    let account = state
        .reset_service
        .resolve(&token_id)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ResolveResetResponseData {
            email: account.email.as_str().to_string(),
            name: account.name,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolveResetResponseData {
    pub email: String,
    pub name: String,
}
