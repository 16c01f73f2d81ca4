use bcrypt::DEFAULT_COST;

use super::errors::PasswordError;

/// Password hashing implementation.
///
/// Bcrypt with a per-call random salt; the work factor is configurable and
/// defaults to cost 12. The output string self-describes algorithm, cost,
/// salt, and digest.
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Create a hasher with the default work factor (cost 12).
    pub fn new() -> Self {
        Self { cost: DEFAULT_COST }
    }

    /// Create a hasher with an explicit work factor.
    ///
    /// # Arguments
    /// * `cost` - Bcrypt cost parameter (4..=31)
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a plaintext password.
    ///
    /// A fresh salt is generated on every call, so hashing the same
    /// password twice yields two different strings.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// Self-describing bcrypt hash string
    ///
    /// # Errors
    /// * `HashingFailed` - The hashing operation itself failed; this is a
    ///   programming error (e.g. an out-of-range cost), not a condition a
    ///   request handler should try to recover from
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        bcrypt::hash(password, self.cost).map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// Recomputes with the salt and cost embedded in `hash` and compares in
    /// constant time. Returns `false` for a malformed hash rather than an
    /// error; callers must treat both as "authentication failed".
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored hash string
    ///
    /// # Returns
    /// True if the password matches
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        bcrypt::verify(password, hash).unwrap_or(false)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
