pub mod account;
pub mod motor;
pub mod reset_token;

pub use account::PostgresAccountRepository;
pub use motor::PostgresMotorRepository;
pub use reset_token::PostgresResetTokenRepository;
