use thiserror::Error;

/// Error for ResetTokenId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResetTokenIdError {
    #[error("Invalid reset token format: {0}")]
    InvalidFormat(String),
}

/// Error for reset-mail delivery failures
#[derive(Debug, Clone, Error)]
pub enum MailerError {
    #[error("Invalid recipient address: {0}")]
    InvalidRecipient(String),

    #[error("Failed to send mail: {0}")]
    SendFailed(String),
}

/// Top-level error for the password-reset workflow.
///
/// An unknown token, an expired token, a superseded token, and a vanished
/// account all collapse into `NotFound`, so the caller learns nothing
/// about which check failed.
#[derive(Debug, Clone, Error)]
pub enum ResetError {
    #[error("Reset token or account not found")]
    NotFound,

    #[error("A password reset was requested too recently")]
    Cooldown,

    #[error("New password must not equal the account email")]
    PolicyViolation,

    #[error("Failed to send reset email: {0}")]
    Mailer(#[from] MailerError),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
