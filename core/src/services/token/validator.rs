//! Token verification

use std::sync::Arc;

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, Algorithm, Validation};
use tracing::{debug, error};

use crate::domain::entities::token::Claims;
use crate::errors::{DomainError, TokenError};

use super::key_manager::KeyProvider;
use super::revocation::RevocationStore;

/// Verifies signature, expiry and revocation status of tokens
#[derive(Debug)]
pub struct TokenValidator {
    keys: Arc<KeyProvider>,
    revocations: Arc<RevocationStore>,
    validation: Validation,
}

impl TokenValidator {
    pub fn new(keys: Arc<KeyProvider>, revocations: Arc<RevocationStore>) -> Self {
        // Expiry is checked separately so that expired tokens still yield claims.
        let mut validation = Validation::new(Algorithm::RS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "iat", "exp"]);

        Self {
            keys,
            revocations,
            validation,
        }
    }

    /// `true` only while the token is signed by us, unexpired and unrevoked
    pub fn is_valid(&self, token: &str) -> bool {
        match self.check(token) {
            Ok(_) => true,
            Err(DomainError::Token(reason)) => {
                debug!("Token rejected: {}", reason);
                false
            }
            Err(e) => {
                error!("Token validation unavailable: {}", e);
                false
            }
        }
    }

    /// Full validation returning the claims or the precise rejection reason
    ///
    /// # Errors
    ///
    /// * `TokenError::MalformedToken` - bad structure or signature
    /// * `TokenError::Revoked` - explicitly invalidated
    /// * `TokenError::Expired` - validity window has closed
    pub fn check(&self, token: &str) -> Result<Claims, DomainError> {
        self.check_at(token, Utc::now())
    }

    pub(crate) fn check_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, DomainError> {
        let claims = self.claims(token)?;
        if self.revocations.contains(token) {
            return Err(TokenError::Revoked.into());
        }
        if claims.is_expired_at(now) {
            return Err(TokenError::Expired.into());
        }
        Ok(claims)
    }

    /// Decodes the claims of a correctly signed token, ignoring expiry and
    /// revocation.
    pub fn claims(&self, token: &str) -> Result<Claims, DomainError> {
        let key = self.keys.public_key()?;
        decode::<Claims>(token, key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!("Token failed verification: {}", e);
                DomainError::Token(TokenError::MalformedToken)
            })
    }
}
