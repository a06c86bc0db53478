//! Token minting

use std::sync::Arc;

use chrono::{DateTime, Utc};
use jsonwebtoken::{encode, Algorithm, Header};
use tracing::info;
use urm_shared::config::auth::MAX_EXPIRATION_SECONDS;

use crate::domain::entities::role::RoleLevel;
use crate::domain::entities::token::{Claims, IssuedToken};
use crate::errors::{DomainError, TokenError};

use super::key_manager::KeyProvider;

/// Mints RS256-signed tokens carrying subject, username, role and expiry
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    keys: Arc<KeyProvider>,
    ttl_seconds: i64,
}

impl TokenIssuer {
    /// Creates an issuer; `ttl_seconds` must be positive and at most
    /// `MAX_EXPIRATION_SECONDS`
    pub fn new(keys: Arc<KeyProvider>, ttl_seconds: i64) -> Result<Self, DomainError> {
        if ttl_seconds <= 0 || ttl_seconds > MAX_EXPIRATION_SECONDS {
            return Err(DomainError::Configuration {
                message: format!(
                    "Token TTL must be between 1 and {} seconds, got {}",
                    MAX_EXPIRATION_SECONDS, ttl_seconds
                ),
            });
        }
        Ok(Self { keys, ttl_seconds })
    }

    /// Configured lifetime in seconds
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    /// Issues a token valid from now for the configured TTL
    ///
    /// # Errors
    ///
    /// * `DomainError::Validation` - an argument is blank
    /// * `AuthError::UnknownRole` - `role` is not in the hierarchy
    /// * `DomainError::Configuration` - key material is unusable
    pub fn issue(&self, user_id: &str, username: &str, role: &str) -> Result<IssuedToken, DomainError> {
        self.issue_at(user_id, username, role, Utc::now())
    }

    pub(crate) fn issue_at(
        &self,
        user_id: &str,
        username: &str,
        role: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, DomainError> {
        for (field, value) in [("user_id", user_id), ("username", username), ("role", role)] {
            if value.trim().is_empty() {
                return Err(DomainError::Validation {
                    message: format!("{} must not be empty", field),
                });
            }
        }
        let level = RoleLevel::from_role_id(role)?;

        let claims = Claims::new(user_id, username, level.role_id(), now, self.ttl_seconds);
        let token = encode(&Header::new(Algorithm::RS256), &claims, self.keys.private_key()?)
            .map_err(|e| TokenError::IssueFailed {
                message: e.to_string(),
            })?;

        info!(sub = %claims.sub, jti = %claims.jti, role = %level, "Issued token");

        Ok(IssuedToken {
            token,
            expires_in: self.ttl_seconds,
            expires_at: claims.expires_at(),
        })
    }
}
