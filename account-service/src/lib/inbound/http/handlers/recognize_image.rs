use axum::extract::Multipart;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::motor::ports::MotorServicePort;
use crate::domain::prediction::ports::ImageClassifier;
use crate::domain::storage::extension_for_mime;
use crate::domain::storage::random_object_name;
use crate::domain::storage::ObjectStore;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

const IMAGE_NAME_LENGTH: usize = 30;

/// Classify an uploaded motorcycle photo, keep the file, and record the
/// verdict under the uploader's account.
pub async fn recognize_image(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedAccount>,
    mut multipart: Multipart,
) -> Result<ApiSuccess<RecognizeImageResponseData>, ApiError> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
        .ok_or_else(|| ApiError::BadRequest("Missing image upload".to_string()))?;

    let content_type = field
        .content_type()
        .map(str::to_string)
        .ok_or_else(|| ApiError::BadRequest("Missing content type on upload".to_string()))?;

    let extension = extension_for_mime(&content_type).ok_or_else(|| {
        ApiError::UnprocessableEntity(format!("Unsupported image type: {}", content_type))
    })?;

    let bytes = field
        .bytes()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let prediction = state
        .model_gateway
        .classify(bytes.to_vec(), &content_type)
        .await
        .map_err(ApiError::from)?;

    let filename = format!("{}{}", random_object_name(IMAGE_NAME_LENGTH), extension);

    state
        .object_store
        .put(&filename, bytes.to_vec(), &content_type)
        .await
        .map_err(|e| ApiError::InternalServerError(e.to_string()))?;

    let image = state
        .motor_service
        .record_image(&auth.account_id, filename, prediction.model.clone())
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        RecognizeImageResponseData {
            image_id: image.id.0,
            model: image.predicted_model,
            image_url: state.object_store.public_url(&image.filename),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecognizeImageResponseData {
    pub image_id: i64,
    pub model: String,
    pub image_url: String,
}
