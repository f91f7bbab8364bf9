//! Store configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `LAVKA_DATABASE_URL` - `SQLite` connection string (falls back to
//!   `DATABASE_URL`)
//! - `LAVKA_TOKEN_SECRET` - Verification-token signing secret (min 32 chars)
//! - `LAVKA_MAIL_API_URL` - Transactional-mail API endpoint
//! - `LAVKA_MAIL_API_KEY` - Mail API key
//! - `LAVKA_MAIL_FROM` - Sender address for outbound mail

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_TOKEN_SECRET_LENGTH: usize = 32;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Store application configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Database connection URL.
    pub database_url: SecretString,
    /// Verification-token signing secret.
    pub token_secret: SecretString,
    /// Outbound mail configuration.
    pub mail: MailConfig,
}

/// Transactional-mail API configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct MailConfig {
    /// Mail API endpoint URL.
    pub api_url: String,
    /// Mail API key.
    pub api_key: SecretString,
    /// Sender address for outbound mail.
    pub sender: String,
}

impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &"[REDACTED]")
            .field("sender", &self.sender)
            .finish()
    }
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or the token
    /// secret fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("LAVKA_DATABASE_URL")?;
        let token_secret = SecretString::from(get_required_env("LAVKA_TOKEN_SECRET")?);
        validate_token_secret(&token_secret, "LAVKA_TOKEN_SECRET")?;

        let mail = MailConfig::from_env()?;

        Ok(Self {
            database_url,
            token_secret,
            mail,
        })
    }
}

impl MailConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: get_required_env("LAVKA_MAIL_API_URL")?,
            api_key: SecretString::from(get_required_env("LAVKA_MAIL_API_KEY")?),
            sender: get_required_env("LAVKA_MAIL_FROM")?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Validate that the token secret meets minimum length requirements.
fn validate_token_secret(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_TOKEN_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_TOKEN_SECRET_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}
