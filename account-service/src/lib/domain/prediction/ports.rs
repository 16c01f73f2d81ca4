use async_trait::async_trait;

use crate::domain::prediction::errors::PredictionError;
use crate::domain::prediction::models::ImagePrediction;
use crate::domain::prediction::models::PriceEstimate;
use crate::domain::prediction::models::PriceQuery;

/// Motorcycle photo classifier collaborator.
#[async_trait]
pub trait ImageClassifier: Send + Sync + 'static {
    /// Classify the motorcycle model in an uploaded photo.
    ///
    /// # Errors
    /// * `Rejected` - The model refused the input
    /// * `Unavailable` - The model could not be reached
    async fn classify(
        &self,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<ImagePrediction, PredictionError>;
}

/// Second-hand price estimator collaborator.
#[async_trait]
pub trait PricePredictor: Send + Sync + 'static {
    /// Estimate a price with its confidence range.
    ///
    /// # Errors
    /// * `Rejected` - The model refused the query (unknown model, year out
    ///   of range for the model, ...)
    /// * `Unavailable` - The model could not be reached
    async fn estimate(&self, query: PriceQuery) -> Result<PriceEstimate, PredictionError>;
}
