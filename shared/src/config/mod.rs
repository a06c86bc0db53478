//! Configuration module with business-specific sub-modules
//!
//! - `auth` - JWT key material, token TTL and revocation housekeeping
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server binding

pub mod auth;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use auth::JwtConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::ServerConfig;

/// Errors raised while reading configuration from the environment.
///
/// Every variant is fatal: the process must not start with bad settings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration variable: {var}")]
    Missing { var: String },

    #[error("Invalid value for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// JWT configuration
    pub jwt: JwtConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        Ok(Self {
            environment,
            server: ServerConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            logging: LoggingConfig::from_env(environment),
        })
    }
}

/// Reads an optional variable and parses it, falling back to `default` when unset.
pub(crate) fn parse_var<T>(var: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(var) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var: var.to_string(),
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

/// Reads a variable that must be present and non-empty.
pub(crate) fn required_var(var: &str) -> Result<String, ConfigError> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(ConfigError::Missing {
            var: var.to_string(),
        }),
    }
}
