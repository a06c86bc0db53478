//! Hierarchical role check run before every privileged operation

use std::sync::Arc;

use tracing::warn;

use crate::domain::entities::role::RoleLevel;
use crate::domain::entities::token::Claims;
use crate::errors::{AuthError, DomainError};
use crate::services::token::TokenValidator;

/// Enforces "caller's role level >= required level"
#[derive(Debug, Clone)]
pub struct AuthorizationGuard {
    validator: Arc<TokenValidator>,
}

impl AuthorizationGuard {
    pub fn new(validator: Arc<TokenValidator>) -> Self {
        Self { validator }
    }

    /// Admits the caller when `token` is currently valid and its role is at
    /// least `minimum`. Returns the caller's claims on success.
    ///
    /// # Errors
    ///
    /// * `AuthError::Unauthenticated` - malformed, expired or revoked token
    /// * `AuthError::UnknownRole` - the token names a role outside the hierarchy
    /// * `AuthError::Forbidden` - valid session, insufficient role level
    /// * `DomainError::Configuration` - key material is unusable
    pub fn require(&self, token: &str, minimum: RoleLevel) -> Result<Claims, DomainError> {
        let claims = self.validator.check(token).map_err(|e| match e {
            DomainError::Token(reason) => AuthError::Unauthenticated(reason).into(),
            other => other,
        })?;

        let actual = RoleLevel::from_role_id(&claims.role)?;
        if !actual.satisfies(minimum) {
            warn!(sub = %claims.sub, required = %minimum, actual = %actual, "Access denied");
            return Err(AuthError::Forbidden {
                required: minimum,
                actual,
            }
            .into());
        }

        Ok(claims)
    }

    /// Same as [`require`](Self::require) with the minimum given as a role id
    pub fn require_role_id(&self, token: &str, minimum: &str) -> Result<Claims, DomainError> {
        let minimum = RoleLevel::from_role_id(minimum)?;
        self.require(token, minimum)
    }
}
