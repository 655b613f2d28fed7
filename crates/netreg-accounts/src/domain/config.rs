//! # Accounts Configuration
//!
//! Configuration with validation. The salt and secret are deployment
//! material; defaults exist so tests run without ceremony, but
//! [`AccountsConfig::validate`] refuses placeholder values outside tests.

use serde::{Deserialize, Serialize};
use shared_types::DEFAULT_TOKEN_MAX_AGE;

/// Environment variable holding the password salt.
pub const ENV_SALT: &str = "NETREG_SALT";

/// Environment variable holding the token-signing secret.
pub const ENV_SECRET: &str = "NETREG_SECRET";

/// Environment variable holding the public domain used in mail bodies.
pub const ENV_DOMAIN: &str = "NETREG_DOMAIN";

/// Placeholder value that must not survive into a real deployment.
const PLACEHOLDER: &str = "change-me";

/// Main accounts configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountsConfig {
    /// Process-wide password salt.
    pub salt: String,
    /// HMAC secret for signed tokens.
    pub secret: String,
    /// Public domain name rendered into mail bodies and verify URLs.
    pub domain: String,
    /// Minimum password length.
    pub min_password_len: usize,
    /// Maximum age of signed tokens, in seconds.
    pub token_max_age: u64,
}

impl Default for AccountsConfig {
    fn default() -> Self {
        Self {
            salt: PLACEHOLDER.to_string(),
            secret: PLACEHOLDER.to_string(),
            domain: "netreg.example".to_string(),
            min_password_len: 6,
            token_max_age: DEFAULT_TOKEN_MAX_AGE,
        }
    }
}

impl AccountsConfig {
    /// Load configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(salt) = std::env::var(ENV_SALT) {
            config.salt = salt;
        }
        if let Ok(secret) = std::env::var(ENV_SECRET) {
            config.secret = secret;
        }
        if let Ok(domain) = std::env::var(ENV_DOMAIN) {
            config.domain = domain;
        }
        config
    }

    /// Reject configurations unfit for deployment.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.salt.is_empty() || self.salt == PLACEHOLDER {
            return Err(ConfigError::PlaceholderSecret { name: ENV_SALT });
        }
        if self.secret.is_empty() || self.secret == PLACEHOLDER {
            return Err(ConfigError::PlaceholderSecret { name: ENV_SECRET });
        }
        if self.min_password_len == 0 {
            return Err(ConfigError::Invalid(
                "min_password_len cannot be 0".to_string(),
            ));
        }
        if self.token_max_age == 0 {
            return Err(ConfigError::Invalid(
                "token_max_age cannot be 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// A secret is unset or still the placeholder.
    #[error("{name} is unset or still the placeholder value")]
    PlaceholderSecret { name: &'static str },

    /// General configuration error.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
