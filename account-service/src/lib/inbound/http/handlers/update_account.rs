use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::errors::EmailError;
use crate::domain::account::models::Account;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::UpdateAccountCommand;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

pub async fn update_account(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedAccount>,
    Json(body): Json<UpdateAccountRequest>,
) -> Result<ApiSuccess<UpdateAccountResponseData>, ApiError> {
    let command = body.try_into_command()?;

    state
        .account_service
        .update(&auth.account_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::new(StatusCode::OK, account.into()))
}

/// HTTP request body for a partial account update (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct UpdateAccountRequest {
    email: Option<String>,
    name: Option<String>,
    password: Option<String>,
}

impl UpdateAccountRequest {
    fn try_into_command(self) -> Result<UpdateAccountCommand, EmailError> {
        let email = self.email.map(EmailAddress::new).transpose()?;
        Ok(UpdateAccountCommand {
            email,
            name: self.name,
            password: self.password,
        })
    }
}

impl From<EmailError> for ApiError {
    fn from(err: EmailError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateAccountResponseData {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub name: String,
}

impl From<&Account> for UpdateAccountResponseData {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.0,
            email: account.email.as_str().to_string(),
            username: account.username.as_str().to_string(),
            name: account.name.clone(),
        }
    }
}
