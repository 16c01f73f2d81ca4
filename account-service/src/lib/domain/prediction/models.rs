use serde::Serialize;

/// Input to the price-estimation model.
#[derive(Debug, Clone, Serialize)]
pub struct PriceQuery {
    pub model: String,
    pub year: i32,
    pub mileage: i32,
    pub province: String,
    pub engine_size: i32,
}

/// Price estimate with its confidence range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceEstimate {
    pub predicted_price: i64,
    pub min_price: i64,
    pub max_price: i64,
}

/// Classifier verdict for an uploaded photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePrediction {
    pub model: String,
}
