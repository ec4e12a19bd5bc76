//! Configuration management

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

/// Relay server configuration
///
/// Loaded once at startup and passed into the router state; business logic
/// never reads the process environment directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Path prefix for all routes (a single path segment)
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Shared secret token. Gates install/uninstall requests and must be
    /// echoed back by Telegram on every webhook delivery. Defaults to empty,
    /// which fails the strength gate until the deployment overrides it.
    #[serde(default)]
    pub secret_token: String,

    /// HTTP server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Telegram Bot API base URL
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

fn default_prefix() -> String {
    "public".to_string()
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_api_base() -> String {
    "https://api.telegram.org".to_string()
}

impl RelayConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let config = Self {
            prefix: std::env::var("PREFIX").unwrap_or_else(|_| default_prefix()),
            secret_token: std::env::var("SECRET_TOKEN").unwrap_or_default(),
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| default_bind_addr()),
            api_base: std::env::var("TELEGRAM_API_BASE").unwrap_or_else(|_| default_api_base()),
        };

        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can produce a working router.
    pub fn validate(&self) -> Result<()> {
        if self.prefix.is_empty() || self.prefix.contains('/') {
            return Err(anyhow!(
                "PREFIX must be a single non-empty path segment, got '{}'",
                self.prefix
            ));
        }
        Ok(())
    }
}
