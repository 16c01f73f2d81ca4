use chrono::Duration;

use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::token::AccessPolicy;
use crate::token::AccessTokenPayload;
use crate::token::TokenCodec;
use crate::token::TokenError;

/// Authentication coordinator combining password hashing, token encoding,
/// and expiry policy.
///
/// Built once from process configuration and shared across request
/// handlers; holds no mutable state.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    codec: TokenCodec,
    policy: AccessPolicy,
    access_ttl: Duration,
}

/// A freshly issued access token with its expiry timestamp.
///
/// The expiry is echoed to clients alongside the token string.
pub struct IssuedToken {
    pub token: String,
    pub expires_at: i64,
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `secret` - Symmetric token-signing secret
    /// * `algorithm` - MAC algorithm name ("HS256", "HS384", "HS512")
    /// * `access_ttl_minutes` - Access-token lifetime in minutes
    ///
    /// # Errors
    /// * `UnsupportedAlgorithm` - Algorithm name is not an HMAC algorithm
    pub fn new(secret: &[u8], algorithm: &str, access_ttl_minutes: i64) -> Result<Self, TokenError> {
        Ok(Self {
            password_hasher: PasswordHasher::new(),
            codec: TokenCodec::new(secret, algorithm)?,
            policy: AccessPolicy::new(),
            access_ttl: Duration::minutes(access_ttl_minutes),
        })
    }

    /// Issue a signed access token for an account.
    ///
    /// Stamps `exp = now + access_ttl` and signs the payload.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    pub fn issue_access_token(&self, account_id: i64) -> Result<IssuedToken, TokenError> {
        let payload = AccessTokenPayload::with_ttl(account_id, self.access_ttl);
        let token = self.codec.encode(&payload)?;

        Ok(IssuedToken {
            token,
            expires_at: payload.exp,
        })
    }

    /// Authenticate a token string and return the subject account id.
    ///
    /// Decodes (authenticity) then validates (expiry). The two failure
    /// kinds stay distinct so callers can map them to unauthenticated vs
    /// forbidden responses.
    ///
    /// # Errors
    /// * `VerificationFailed` - Token is forged or malformed
    /// * `Expired` - Token is authentic but past its expiry
    pub fn authenticate(&self, token: &str) -> Result<i64, TokenError> {
        let payload = self.codec.decode(token)?;
        self.policy.validate(&payload)?;

        Ok(payload.sub)
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a password against a stored hash.
    ///
    /// Returns false for a wrong password or a malformed hash alike.
    pub fn verify_password(&self, password: &str, hash: &str) -> bool {
        self.password_hasher.verify(password, hash)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn authenticator() -> Authenticator {
        Authenticator::new(b"test_secret_key_at_least_32_bytes!", "HS256", 30)
            .expect("Failed to build authenticator")
    }

    #[test]
    fn test_issue_and_authenticate() {
        let auth = authenticator();

        let issued = auth.issue_access_token(42).expect("Failed to issue token");
        assert!(!issued.token.is_empty());
        assert!(issued.expires_at > Utc::now().timestamp());

        let account_id = auth
            .authenticate(&issued.token)
            .expect("Authentication failed");
        assert_eq!(account_id, 42);
    }

    #[test]
    fn test_authenticate_garbage_is_verification_failure() {
        let auth = authenticator();

        assert_eq!(
            auth.authenticate("invalid.token.here"),
            Err(TokenError::VerificationFailed)
        );
    }

    #[test]
    fn test_authenticate_foreign_token_is_verification_failure() {
        let auth = authenticator();
        let other =
            Authenticator::new(b"different_secret_32_bytes_long_key!", "HS256", 30).unwrap();

        let issued = other.issue_access_token(42).unwrap();
        assert_eq!(
            auth.authenticate(&issued.token),
            Err(TokenError::VerificationFailed)
        );
    }

    #[test]
    fn test_authenticate_expired_is_forbidden_kind() {
        let auth = authenticator();

        // Authentic token, already expired: must fail as Expired, not
        // VerificationFailed.
        let codec = TokenCodec::new(b"test_secret_key_at_least_32_bytes!", "HS256").unwrap();
        let stale = codec
            .encode(&AccessTokenPayload::new(42, Utc::now().timestamp() - 1))
            .unwrap();

        assert_eq!(auth.authenticate(&stale), Err(TokenError::Expired));
    }

    #[test]
    fn test_password_passthrough() {
        let auth = authenticator();

        let hash = auth.hash_password("password123").expect("Failed to hash");
        assert!(auth.verify_password("password123", &hash));
        assert!(!auth.verify_password("wrong", &hash));
    }
}
