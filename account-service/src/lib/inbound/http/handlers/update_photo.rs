use axum::extract::Multipart;
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

pub async fn update_photo(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedAccount>,
    mut multipart: Multipart,
) -> Result<ApiSuccess<UpdatePhotoResponseData>, ApiError> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
        .ok_or_else(|| ApiError::BadRequest("Missing photo upload".to_string()))?;

    let content_type = field
        .content_type()
        .map(str::to_string)
        .ok_or_else(|| ApiError::BadRequest("Missing content type on upload".to_string()))?;

    let bytes = field
        .bytes()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let account = state
        .account_service
        .update_photo(&auth.account_id, &content_type, bytes.to_vec())
        .await
        .map_err(ApiError::from)?;

    let photo_url = account
        .photo
        .as_deref()
        .map(|name| state.object_store.public_url(name))
        .unwrap_or_default();

    Ok(ApiSuccess::new(
        StatusCode::OK,
        UpdatePhotoResponseData { photo_url },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdatePhotoResponseData {
    pub photo_url: String,
}
