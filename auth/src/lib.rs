//! Authentication and credential-lifecycle library
//!
//! Provides the credential core for the account service:
//! - Password hashing (bcrypt, configurable work factor)
//! - Signed access-token encoding and decoding (HMAC-family JWT)
//! - Expiry policy, kept separate from signature verification
//! - An authentication coordinator tying the three together
//!
//! The crate is deliberately free of I/O: persistence, transport, and the
//! password-reset workflow live in the service that consumes it.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("wrong_password", &hash));
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::{AccessTokenPayload, TokenCodec};
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!", "HS256").unwrap();
//! let payload = AccessTokenPayload::new(42, 2_000_000_000);
//! let token = codec.encode(&payload).unwrap();
//! let decoded = codec.decode(&token).unwrap();
//! assert_eq!(decoded, payload);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", "HS256", 30).unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue a token
//! assert!(auth.verify_password("password123", &hash));
//! let issued = auth.issue_access_token(7).unwrap();
//!
//! // Every authenticated request: decode then check expiry
//! let account_id = auth.authenticate(&issued.token).unwrap();
//! assert_eq!(account_id, 7);
//! ```

pub mod authenticator;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use authenticator::Authenticator;
pub use authenticator::IssuedToken;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::AccessPolicy;
pub use token::AccessTokenPayload;
pub use token::TokenCodec;
pub use token::TokenError;
