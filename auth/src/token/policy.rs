use chrono::Utc;

use super::claims::AccessTokenPayload;
use super::errors::TokenError;

/// Validates decoded payloads against the wall clock.
///
/// Answers "is this token still valid" for payloads the codec has already
/// proven authentic. A payload at exactly its expiry second still passes;
/// one second past it does not.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessPolicy;

impl AccessPolicy {
    pub fn new() -> Self {
        Self
    }

    /// Check a payload against the current UTC time (second resolution).
    ///
    /// # Errors
    /// * `Expired` - `now > payload.exp`
    pub fn validate(&self, payload: &AccessTokenPayload) -> Result<(), TokenError> {
        self.validate_at(payload, Utc::now().timestamp())
    }

    /// Check a payload against an explicit timestamp.
    pub fn validate_at(&self, payload: &AccessTokenPayload, now: i64) -> Result<(), TokenError> {
        if now > payload.exp {
            Err(TokenError::Expired)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expired_one_second_ago() {
        let policy = AccessPolicy::new();
        let payload = AccessTokenPayload::new(1, 999);

        assert_eq!(policy.validate_at(&payload, 1000), Err(TokenError::Expired));
    }

    #[test]
    fn test_valid_one_second_ahead() {
        let policy = AccessPolicy::new();
        let payload = AccessTokenPayload::new(1, 1001);

        assert!(policy.validate_at(&payload, 1000).is_ok());
    }

    #[test]
    fn test_exactly_at_expiry_passes() {
        let policy = AccessPolicy::new();
        let payload = AccessTokenPayload::new(1, 1000);

        assert!(policy.validate_at(&payload, 1000).is_ok());
    }

    #[test]
    fn test_validate_uses_wall_clock() {
        let policy = AccessPolicy::new();

        let future = AccessTokenPayload::new(1, Utc::now().timestamp() + 60);
        assert!(policy.validate(&future).is_ok());

        let past = AccessTokenPayload::new(1, Utc::now().timestamp() - 60);
        assert_eq!(policy.validate(&past), Err(TokenError::Expired));
    }
}
