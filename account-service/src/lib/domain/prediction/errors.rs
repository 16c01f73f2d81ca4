use thiserror::Error;

/// Error for prediction-model collaborators.
///
/// The models are opaque: the only contract is success or one of these two
/// failure kinds.
#[derive(Debug, Clone, Error)]
pub enum PredictionError {
    /// The model looked at the input and refused it.
    #[error("Prediction rejected: {0}")]
    Rejected(String),

    /// The model could not be reached or answered garbage.
    #[error("Prediction service unavailable: {0}")]
    Unavailable(String),
}
