use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub email: EmailConfig,
    pub storage: StorageConfig,
    pub models: ModelsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Credential-core settings. The secret has no default: startup fails if it
/// is not supplied. The three durations are independent of each other.
#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub algorithm: String,
    pub access_ttl_minutes: i64,
    pub reset_ttl_minutes: i64,
    pub reset_cooldown_minutes: i64,
}

/// SMTP settings for reset mail. An empty host switches the mailer into
/// no-op mode (log only).
#[derive(Debug, Deserialize, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    pub sender: String,
    pub reset_base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub gateway_url: String,
    pub public_base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ModelsConfig {
    pub image_url: String,
    pub price_url: String,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, AUTH__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// Fails if `auth.secret` is absent or empty; there is no fallback
    /// secret.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .set_default("server.http_port", 8080)?
            .set_default("auth.algorithm", "HS256")?
            .set_default("auth.access_ttl_minutes", 30)?
            .set_default("auth.reset_ttl_minutes", 1440)?
            .set_default("auth.reset_cooldown_minutes", 10)?
            .set_default("email.smtp_host", "")?
            .set_default("email.smtp_port", 587)?
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: AUTH__SECRET=... overrides auth.secret
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        if config.auth.secret.trim().is_empty() {
            return Err(ConfigError::Message(
                "auth.secret must be configured; refusing to start with an empty token secret"
                    .to_string(),
            ));
        }

        Ok(config)
    }
}
