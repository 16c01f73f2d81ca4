use thiserror::Error;

/// Error for motor and motor-image bookkeeping.
///
/// A row owned by a different account reads as `NotFound`; callers never
/// learn that the row exists at all.
#[derive(Debug, Clone, Error)]
pub enum MotorError {
    #[error("Motor not found: {0}")]
    NotFound(String),

    #[error("Motor image not found: {0}")]
    ImageNotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
