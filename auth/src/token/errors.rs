use thiserror::Error;

/// Error type for access-token operations.
///
/// `VerificationFailed` and `Expired` are distinct kinds: a forged or
/// malformed token is an authentication failure, while a genuine token
/// past its expiry is an authorization failure. Callers map them to
/// different responses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token verification failed")]
    VerificationFailed,

    #[error("Token is expired")]
    Expired,

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Unsupported token algorithm: {0}")]
    UnsupportedAlgorithm(String),
}
