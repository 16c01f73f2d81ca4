pub mod claims;
pub mod codec;
pub mod errors;
pub mod policy;

pub use claims::AccessTokenPayload;
pub use codec::TokenCodec;
pub use errors::TokenError;
pub use policy::AccessPolicy;
