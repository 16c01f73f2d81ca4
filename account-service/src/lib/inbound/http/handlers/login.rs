use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::errors::AccountError;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    // Unknown email, malformed email, and wrong password must all read the
    // same from the outside.
    let email = EmailAddress::new(body.email)
        .map_err(|_| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    let account = state
        .account_service
        .get_by_email(&email)
        .await
        .map_err(|e| match e {
            AccountError::NotFound(_) => ApiError::Unauthorized("Invalid credentials".to_string()),
            _ => ApiError::from(e),
        })?;

    if !state
        .authenticator
        .verify_password(&body.password, &account.password_hash)
    {
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    }

    let issued = state
        .authenticator
        .issue_access_token(account.id.0)
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            access_token: issued.token,
            expires_at: issued.expires_at,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub access_token: String,
    pub expires_at: i64,
}
