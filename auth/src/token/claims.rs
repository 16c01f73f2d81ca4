use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claim set carried inside a signed access token.
///
/// Holds the subject account id and the unix-epoch-seconds expiry. The
/// server keeps no session state; the token is the whole credential.
/// Immutable once encoded.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessTokenPayload {
    /// Subject (account identifier)
    pub sub: i64,

    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,
}

impl AccessTokenPayload {
    /// Create a payload with an explicit expiry timestamp.
    pub fn new(sub: i64, exp: i64) -> Self {
        Self { sub, exp }
    }

    /// Create a payload expiring `ttl` from the current wall-clock time.
    ///
    /// # Arguments
    /// * `sub` - Subject account id
    /// * `ttl` - Time until expiry
    ///
    /// # Returns
    /// Payload with `exp = now + ttl`
    pub fn with_ttl(sub: i64, ttl: Duration) -> Self {
        Self::new(sub, (Utc::now() + ttl).timestamp())
    }
}
