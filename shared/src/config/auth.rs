//! Authentication configuration

use serde::{Deserialize, Serialize};

use super::{parse_var, required_var, ConfigError};

/// Default token lifetime (1 hour)
pub const DEFAULT_EXPIRATION_SECONDS: i64 = 3600;

/// Default refresh grace window after expiry (7 days)
pub const DEFAULT_REFRESH_GRACE_SECONDS: i64 = 604_800;

/// Longest accepted token lifetime (one year)
pub const MAX_EXPIRATION_SECONDS: i64 = 31_536_000;

/// Longest accepted refresh grace window (one year)
pub const MAX_REFRESH_GRACE_SECONDS: i64 = 31_536_000;

/// Default interval between revocation-set sweeps (5 minutes)
pub const DEFAULT_CLEANUP_INTERVAL_SECONDS: u64 = 300;

/// JWT configuration
///
/// Key material is carried as base64-encoded DER: PKCS#8 for the private
/// key and X.509 SubjectPublicKeyInfo for the public key.
#[derive(Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Base64 PKCS#8 RSA private key used for signing
    pub private_key: String,

    /// Base64 X.509 RSA public key used for verification
    pub public_key: String,

    /// Token lifetime in seconds
    #[serde(default = "default_expiration")]
    pub expiration_seconds: i64,

    /// How long after expiry a token may still be refreshed
    #[serde(default = "default_refresh_grace")]
    pub refresh_grace_seconds: i64,

    /// Interval of the background revocation sweep
    #[serde(default = "default_cleanup_interval")]
    pub revocation_cleanup_interval_seconds: u64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("private_key", &"<redacted>")
            .field("public_key", &format_args!("{} bytes", self.public_key.len()))
            .field("expiration_seconds", &self.expiration_seconds)
            .field("refresh_grace_seconds", &self.refresh_grace_seconds)
            .field(
                "revocation_cleanup_interval_seconds",
                &self.revocation_cleanup_interval_seconds,
            )
            .finish()
    }
}

impl JwtConfig {
    /// Create a new JWT configuration from key material with default timings
    pub fn new(private_key: impl Into<String>, public_key: impl Into<String>) -> Self {
        Self {
            private_key: private_key.into(),
            public_key: public_key.into(),
            expiration_seconds: DEFAULT_EXPIRATION_SECONDS,
            refresh_grace_seconds: DEFAULT_REFRESH_GRACE_SECONDS,
            revocation_cleanup_interval_seconds: DEFAULT_CLEANUP_INTERVAL_SECONDS,
        }
    }

    /// Set the token lifetime in seconds
    pub fn with_expiration_seconds(mut self, seconds: i64) -> Self {
        self.expiration_seconds = seconds;
        self
    }

    /// Set the refresh grace window in seconds
    pub fn with_refresh_grace_seconds(mut self, seconds: i64) -> Self {
        self.refresh_grace_seconds = seconds;
        self
    }

    /// Create from environment variables
    ///
    /// `JWT_PRIVATE_KEY` and `JWT_PUBLIC_KEY` are mandatory.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            private_key: required_var("JWT_PRIVATE_KEY")?,
            public_key: required_var("JWT_PUBLIC_KEY")?,
            expiration_seconds: parse_var("JWT_EXPIRATION", DEFAULT_EXPIRATION_SECONDS)?,
            refresh_grace_seconds: parse_var("JWT_REFRESH_GRACE", DEFAULT_REFRESH_GRACE_SECONDS)?,
            revocation_cleanup_interval_seconds: parse_var(
                "JWT_REVOCATION_CLEANUP_INTERVAL",
                DEFAULT_CLEANUP_INTERVAL_SECONDS,
            )?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the timing values are usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_EXPIRATION_SECONDS).contains(&self.expiration_seconds) {
            return Err(ConfigError::Invalid {
                var: "JWT_EXPIRATION".to_string(),
                reason: format!("must be between 1 and {} seconds", MAX_EXPIRATION_SECONDS),
            });
        }
        if !(0..=MAX_REFRESH_GRACE_SECONDS).contains(&self.refresh_grace_seconds) {
            return Err(ConfigError::Invalid {
                var: "JWT_REFRESH_GRACE".to_string(),
                reason: format!("must be between 0 and {} seconds", MAX_REFRESH_GRACE_SECONDS),
            });
        }
        if self.revocation_cleanup_interval_seconds == 0 {
            return Err(ConfigError::Invalid {
                var: "JWT_REVOCATION_CLEANUP_INTERVAL".to_string(),
                reason: "must be at least one second".to_string(),
            });
        }
        Ok(())
    }
}

fn default_expiration() -> i64 {
    DEFAULT_EXPIRATION_SECONDS
}

fn default_refresh_grace() -> i64 {
    DEFAULT_REFRESH_GRACE_SECONDS
}

fn default_cleanup_interval() -> u64 {
    DEFAULT_CLEANUP_INTERVAL_SECONDS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_defaults() {
        let config = JwtConfig::new("priv", "pub");
        assert_eq!(config.expiration_seconds, 3600);
        assert_eq!(config.refresh_grace_seconds, 604_800);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_non_positive_ttl() {
        let config = JwtConfig::new("priv", "pub").with_expiration_seconds(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { ref var, .. }) if var == "JWT_EXPIRATION"
        ));
    }

    #[test]
    fn test_validate_rejects_oversized_timings() {
        let config =
            JwtConfig::new("priv", "pub").with_expiration_seconds(MAX_EXPIRATION_SECONDS + 1);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { ref var, .. }) if var == "JWT_EXPIRATION"
        ));

        let config = JwtConfig::new("priv", "pub").with_refresh_grace_seconds(i64::MAX);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { ref var, .. }) if var == "JWT_REFRESH_GRACE"
        ));

        let config = JwtConfig::new("priv", "pub")
            .with_expiration_seconds(MAX_EXPIRATION_SECONDS)
            .with_refresh_grace_seconds(MAX_REFRESH_GRACE_SECONDS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_debug_redacts_private_key() {
        let config = JwtConfig::new("super-secret-material", "pub");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret-material"));
        assert!(rendered.contains("<redacted>"));
    }
}
