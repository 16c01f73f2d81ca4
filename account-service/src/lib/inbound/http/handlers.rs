use auth::TokenError;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::account::errors::AccountError;
use crate::domain::motor::errors::MotorError;
use crate::domain::prediction::errors::PredictionError;
use crate::domain::reset::errors::ResetError;

pub mod create_motor;
pub mod delete_account;
pub mod delete_motor;
pub mod estimate_price;
pub mod forgot_password;
pub mod get_account;
pub mod list_motors;
pub mod login;
pub mod recognize_image;
pub mod register;
pub mod reset_password;
pub mod resolve_reset;
pub mod update_account;
pub mod update_photo;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
    TooManyRequests(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => {
                // The detail stays in the logs; the caller gets an opaque
                // failure.
                tracing::error!(error = %msg, "Internal error while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::TooManyRequests(msg) => (StatusCode::TOO_MANY_REQUESTS, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::NotFound(_) => ApiError::NotFound(err.to_string()),
            AccountError::EmailAlreadyExists(_) | AccountError::UsernameAlreadyExists(_) => {
                ApiError::Conflict(err.to_string())
            }
            AccountError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            AccountError::InvalidUsername(_)
            | AccountError::InvalidEmail(_)
            | AccountError::UnsupportedImageType(_) => ApiError::UnprocessableEntity(err.to_string()),
            AccountError::Storage(_) | AccountError::DatabaseError(_) | AccountError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<ResetError> for ApiError {
    fn from(err: ResetError) -> Self {
        match err {
            ResetError::NotFound => ApiError::NotFound(err.to_string()),
            ResetError::Cooldown => ApiError::TooManyRequests(err.to_string()),
            ResetError::PolicyViolation => ApiError::UnprocessableEntity(err.to_string()),
            ResetError::Mailer(_) | ResetError::DatabaseError(_) | ResetError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<MotorError> for ApiError {
    fn from(err: MotorError) -> Self {
        match err {
            MotorError::NotFound(_) | MotorError::ImageNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            MotorError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<PredictionError> for ApiError {
    fn from(err: PredictionError) -> Self {
        match err {
            PredictionError::Rejected(_) => ApiError::UnprocessableEntity(err.to_string()),
            PredictionError::Unavailable(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::VerificationFailed => ApiError::Unauthorized(err.to_string()),
            TokenError::Expired => ApiError::Forbidden(err.to_string()),
            TokenError::EncodingFailed(_) | TokenError::UnsupportedAlgorithm(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_errors_map_to_distinct_statuses() {
        assert!(matches!(
            ApiError::from(ResetError::Cooldown),
            ApiError::TooManyRequests(_)
        ));
        assert!(matches!(
            ApiError::from(ResetError::PolicyViolation),
            ApiError::UnprocessableEntity(_)
        ));
        assert!(matches!(
            ApiError::from(ResetError::NotFound),
            ApiError::NotFound(_)
        ));
    }

    #[test]
    fn test_token_errors_split_unauthenticated_from_forbidden() {
        assert!(matches!(
            ApiError::from(TokenError::VerificationFailed),
            ApiError::Unauthorized(_)
        ));
        assert!(matches!(
            ApiError::from(TokenError::Expired),
            ApiError::Forbidden(_)
        ));
    }
}
