use std::str::FromStr;

use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::AccessTokenPayload;
use super::errors::TokenError;

/// Encodes and decodes signed access tokens.
///
/// Signs the claim set with a symmetric secret using an HMAC-family
/// algorithm chosen by configuration name (HS256 by default). Decoding
/// answers only "is this token authentic"; expiry is checked separately
/// by [`super::policy::AccessPolicy`].
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenCodec {
    /// Create a codec from a secret and an algorithm name.
    ///
    /// # Arguments
    /// * `secret` - Symmetric signing secret (externally supplied, never a
    ///   hard-coded default)
    /// * `algorithm` - MAC algorithm name: "HS256", "HS384", or "HS512"
    ///
    /// # Returns
    /// Configured codec
    ///
    /// # Errors
    /// * `UnsupportedAlgorithm` - Name is unknown or not an HMAC algorithm
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8], algorithm: &str) -> Result<Self, TokenError> {
        let algorithm = Algorithm::from_str(algorithm)
            .map_err(|_| TokenError::UnsupportedAlgorithm(algorithm.to_string()))?;

        if !matches!(
            algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(TokenError::UnsupportedAlgorithm(format!("{:?}", algorithm)));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
        })
    }

    /// Encode a payload into a signed token string.
    ///
    /// Deterministic for identical payload and secret.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token serialization or signing failed
    pub fn encode(&self, payload: &AccessTokenPayload) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, payload, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify a token's signature and recover its payload.
    ///
    /// Signature mismatch, malformed structure, and algorithm mismatch all
    /// collapse to `VerificationFailed`; callers must not learn which
    /// check rejected the token. Expiry is NOT checked here.
    ///
    /// # Errors
    /// * `VerificationFailed` - Token is forged, malformed, or signed with
    ///   a different secret or algorithm
    pub fn decode(&self, token: &str) -> Result<AccessTokenPayload, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is the policy's concern, not the codec's.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        decode::<AccessTokenPayload>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| TokenError::VerificationFailed)
    }
}
