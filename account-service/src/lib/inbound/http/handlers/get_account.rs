use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::ports::AccountServicePort;
use crate::domain::storage::ObjectStore;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

pub async fn get_account(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedAccount>,
) -> Result<ApiSuccess<GetAccountResponseData>, ApiError> {
    let account = state
        .account_service
        .get(&auth.account_id)
        .await
        .map_err(ApiError::from)?;

    let photo_url = account
        .photo
        .as_deref()
        .map(|name| state.object_store.public_url(name));

    Ok(ApiSuccess::new(
        StatusCode::OK,
        GetAccountResponseData {
            id: account.id.0,
            email: account.email.as_str().to_string(),
            username: account.username.as_str().to_string(),
            name: account.name,
            photo_url,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetAccountResponseData {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub name: String,
    pub photo_url: Option<String>,
}
