//! Configuration for the token service

use urm_shared::config::auth::{DEFAULT_EXPIRATION_SECONDS, DEFAULT_REFRESH_GRACE_SECONDS};
use urm_shared::JwtConfig;

/// Configuration for the token service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenServiceConfig {
    /// Token lifetime in seconds
    pub ttl_seconds: i64,
    /// Window after expiry during which refresh is still accepted
    pub refresh_grace_seconds: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: DEFAULT_EXPIRATION_SECONDS,
            refresh_grace_seconds: DEFAULT_REFRESH_GRACE_SECONDS,
        }
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            ttl_seconds: config.expiration_seconds,
            refresh_grace_seconds: config.refresh_grace_seconds,
        }
    }
}
