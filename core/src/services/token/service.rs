//! Token lifecycle: issuance, logout and refresh

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};
use urm_shared::config::auth::MAX_REFRESH_GRACE_SECONDS;

use crate::domain::entities::token::{Claims, IssuedToken};
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;
use super::issuer::TokenIssuer;
use super::key_manager::KeyProvider;
use super::revocation::RevocationStore;
use super::validator::TokenValidator;

/// Composes issuer, validator and revocation store into the token lifecycle
#[derive(Debug)]
pub struct TokenLifecycleService {
    issuer: TokenIssuer,
    validator: Arc<TokenValidator>,
    revocations: Arc<RevocationStore>,
    config: TokenServiceConfig,
}

impl TokenLifecycleService {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `keys` - Lazily decoded RSA key pair
    /// * `revocations` - Revocation set shared with every validator
    /// * `config` - Token TTL and refresh grace window
    pub fn new(
        keys: Arc<KeyProvider>,
        revocations: Arc<RevocationStore>,
        config: TokenServiceConfig,
    ) -> Result<Self, DomainError> {
        if !(0..=MAX_REFRESH_GRACE_SECONDS).contains(&config.refresh_grace_seconds) {
            return Err(DomainError::Configuration {
                message: format!(
                    "Refresh grace window must be between 0 and {} seconds, got {}",
                    MAX_REFRESH_GRACE_SECONDS, config.refresh_grace_seconds
                ),
            });
        }
        let issuer = TokenIssuer::new(keys.clone(), config.ttl_seconds)?;
        let validator = Arc::new(TokenValidator::new(keys, revocations.clone()));
        Ok(Self {
            issuer,
            validator,
            revocations,
            config,
        })
    }

    /// Validator sharing this service's keys and revocation set
    pub fn validator(&self) -> Arc<TokenValidator> {
        Arc::clone(&self.validator)
    }

    /// Revocation set backing this service
    pub fn revocations(&self) -> Arc<RevocationStore> {
        Arc::clone(&self.revocations)
    }

    /// Issues a token for an already authenticated principal
    pub fn issue(&self, user_id: &str, username: &str, role: &str) -> Result<IssuedToken, DomainError> {
        self.issuer.issue(user_id, username, role)
    }

    pub fn is_valid(&self, token: &str) -> bool {
        self.validator.is_valid(token)
    }

    /// Validates and returns claims, or the reason the token is unusable
    pub fn check(&self, token: &str) -> Result<Claims, DomainError> {
        self.validator.check(token)
    }

    /// Revokes `token`. Already revoked and expired tokens are accepted
    /// silently.
    ///
    /// Tokens that do not carry a verifiable signature are never stored:
    /// they can not pass validation, so logging them out is a no-op.
    pub fn logout(&self, token: &str) {
        let claims = match self.validator.claims(token) {
            Ok(claims) => claims,
            Err(e) => {
                debug!("Logout with an unusable token ignored: {}", e);
                return;
            }
        };

        match self.retain_until(claims.expires_at()) {
            Ok(retain_until) => {
                if self.revocations.revoke(token, retain_until) {
                    info!(sub = %claims.sub, "Token revoked on logout");
                }
            }
            Err(e) => warn!(sub = %claims.sub, "Logout could not revoke token: {}", e),
        }
    }

    /// Revokes `token` and issues a replacement with the same subject,
    /// username and role.
    ///
    /// Expired tokens are accepted while inside the refresh grace window
    /// (`TokenServiceConfig::refresh_grace_seconds`). The window is bounded
    /// so that revocation entries can be pruned once it closes; raising it
    /// keeps expired tokens refreshable for longer at the cost of a larger
    /// revocation set.
    ///
    /// # Errors
    ///
    /// * `TokenError::AlreadyRevoked` - token was logged out or already refreshed
    /// * `TokenError::MalformedToken` - bad structure or signature
    /// * `TokenError::Expired` - expired beyond the refresh grace window
    pub fn refresh(&self, token: &str) -> Result<IssuedToken, DomainError> {
        self.refresh_at(token, Utc::now())
    }

    pub(crate) fn refresh_at(&self, token: &str, now: DateTime<Utc>) -> Result<IssuedToken, DomainError> {
        if self.revocations.contains(token) {
            warn!("Refresh attempted with a revoked token");
            return Err(TokenError::AlreadyRevoked.into());
        }

        let claims = self.validator.claims(token)?;
        let retain_until = self.retain_until(claims.expires_at())?;
        if now >= retain_until {
            return Err(TokenError::Expired.into());
        }

        // Test-and-set: only one concurrent refresh of this token gets past here.
        if !self.revocations.revoke(token, retain_until) {
            warn!(sub = %claims.sub, "Concurrent refresh lost the race");
            return Err(TokenError::AlreadyRevoked.into());
        }

        let refreshed = self
            .issuer
            .issue_at(&claims.sub, &claims.username, &claims.role, now)?;
        info!(sub = %claims.sub, old_jti = %claims.jti, "Token refreshed");
        Ok(refreshed)
    }

    /// Subject of a correctly signed token
    pub fn extract_user_id(&self, token: &str) -> Result<String, DomainError> {
        self.validator.claims(token).map(|claims| claims.sub)
    }

    /// Role identifier of a correctly signed token
    pub fn extract_role(&self, token: &str) -> Result<String, DomainError> {
        self.validator.claims(token).map(|claims| claims.role)
    }

    /// Username of a correctly signed token
    pub fn extract_username(&self, token: &str) -> Result<String, DomainError> {
        self.validator.claims(token).map(|claims| claims.username)
    }

    fn retain_until(&self, expires_at: DateTime<Utc>) -> Result<DateTime<Utc>, DomainError> {
        Duration::try_seconds(self.config.refresh_grace_seconds)
            .and_then(|grace| expires_at.checked_add_signed(grace))
            .ok_or_else(|| DomainError::Configuration {
                message: format!(
                    "Refresh grace of {} seconds overflows the token expiry",
                    self.config.refresh_grace_seconds
                ),
            })
    }
}

