use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::account::models::AccountId;
use crate::domain::reset::errors::ResetTokenIdError;

/// Single-use, time-boxed credential enabling one password change without
/// re-authentication.
///
/// Carries no stored state flag: whether a token is live is computed from
/// `expires_at` at read time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetToken {
    pub id: ResetTokenId,
    pub account_id: AccountId,
    pub expires_at: DateTime<Utc>,
}

impl ResetToken {
    /// Whether the token is past its expiry at the given instant.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Opaque random reset-token identifier (UUID v4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResetTokenId(pub Uuid);

impl ResetTokenId {
    /// Generate a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a reset-token id from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, ResetTokenIdError> {
        Uuid::parse_str(s)
            .map(ResetTokenId)
            .map_err(|e| ResetTokenIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for ResetTokenId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ResetTokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(ResetTokenId::new(), ResetTokenId::new());
    }

    #[test]
    fn test_id_round_trips_through_string() {
        let id = ResetTokenId::new();
        assert_eq!(ResetTokenId::from_string(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn test_id_rejects_garbage() {
        assert!(ResetTokenId::from_string("not-a-uuid").is_err());
    }

    #[test]
    fn test_expiry_boundary() {
        let now = Utc::now();
        let token = ResetToken {
            id: ResetTokenId::new(),
            account_id: AccountId(1),
            expires_at: now,
        };

        assert!(!token.is_expired(now));
        assert!(!token.is_expired(now - Duration::seconds(1)));
        assert!(token.is_expired(now + Duration::seconds(1)));
    }
}
