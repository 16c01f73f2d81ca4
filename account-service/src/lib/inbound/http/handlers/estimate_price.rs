use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::prediction::models::PriceQuery;
use crate::domain::prediction::ports::PricePredictor;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

/// Pass-through to the price model; the caller decides whether to save the
/// estimate as a motor afterwards.
pub async fn estimate_price(
    State(state): State<AppState>,
    Extension(_auth): Extension<AuthenticatedAccount>,
    Json(body): Json<EstimatePriceRequest>,
) -> Result<ApiSuccess<EstimatePriceResponseData>, ApiError> {
    let estimate = state
        .model_gateway
        .estimate(PriceQuery {
            model: body.model,
            year: body.year,
            mileage: body.mileage,
            province: body.province,
            engine_size: body.engine_size,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        EstimatePriceResponseData {
            predicted_price: estimate.predicted_price,
            min_price: estimate.min_price,
            max_price: estimate.max_price,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EstimatePriceRequest {
    model: String,
    year: i32,
    mileage: i32,
    province: String,
    engine_size: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EstimatePriceResponseData {
    pub predicted_price: i64,
    pub min_price: i64,
    pub max_price: i64,
}
