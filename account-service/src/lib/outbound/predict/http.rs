use async_trait::async_trait;
use reqwest::header;
use serde::Deserialize;

use crate::config::ModelsConfig;
use crate::domain::prediction::errors::PredictionError;
use crate::domain::prediction::models::ImagePrediction;
use crate::domain::prediction::models::PriceEstimate;
use crate::domain::prediction::models::PriceQuery;
use crate::domain::prediction::ports::ImageClassifier;
use crate::domain::prediction::ports::PricePredictor;

/// Client for the externally served prediction models.
///
/// Both models answer with a `status` field; `"success"` carries the
/// payload, anything else carries a `message` explaining the refusal.
pub struct HttpModelGateway {
    client: reqwest::Client,
    image_url: String,
    price_url: String,
}

impl HttpModelGateway {
    pub fn new(config: &ModelsConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            image_url: config.image_url.clone(),
            price_url: config.price_url.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    status: String,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PriceRange {
    lower: i64,
    upper: i64,
}

#[derive(Debug, Deserialize)]
struct PriceResponse {
    status: String,
    #[serde(default)]
    predicted_price: Option<i64>,
    #[serde(default)]
    price_range: Option<PriceRange>,
    #[serde(default)]
    message: Option<String>,
}

fn rejection(message: Option<String>) -> PredictionError {
    PredictionError::Rejected(message.unwrap_or_else(|| "model rejected the input".to_string()))
}

#[async_trait]
impl ImageClassifier for HttpModelGateway {
    async fn classify(
        &self,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<ImagePrediction, PredictionError> {
        let response = self
            .client
            .post(&self.image_url)
            .header(header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| PredictionError::Unavailable(e.to_string()))?
            .error_for_status()
            .map_err(|e| PredictionError::Unavailable(e.to_string()))?
            .json::<ImageResponse>()
            .await
            .map_err(|e| PredictionError::Unavailable(e.to_string()))?;

        if response.status != "success" {
            return Err(rejection(response.message));
        }

        response
            .model
            .map(|model| ImagePrediction { model })
            .ok_or_else(|| {
                PredictionError::Unavailable("model response missing prediction".to_string())
            })
    }
}

#[async_trait]
impl PricePredictor for HttpModelGateway {
    async fn estimate(&self, query: PriceQuery) -> Result<PriceEstimate, PredictionError> {
        let response = self
            .client
            .post(&self.price_url)
            .json(&query)
            .send()
            .await
            .map_err(|e| PredictionError::Unavailable(e.to_string()))?
            .error_for_status()
            .map_err(|e| PredictionError::Unavailable(e.to_string()))?
            .json::<PriceResponse>()
            .await
            .map_err(|e| PredictionError::Unavailable(e.to_string()))?;

        if response.status != "success" {
            return Err(rejection(response.message));
        }

        match (response.predicted_price, response.price_range) {
            (Some(predicted_price), Some(range)) => Ok(PriceEstimate {
                predicted_price,
                min_price: range.lower,
                max_price: range.upper,
            }),
            _ => Err(PredictionError::Unavailable(
                "model response missing prediction".to_string(),
            )),
        }
    }
}
