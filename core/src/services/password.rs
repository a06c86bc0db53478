//! Password hashing capability
//!
//! Services only see the [`PasswordHasher`] trait; the bcrypt backed
//! implementation is the one wired in by the binary.

use tracing::warn;

use crate::errors::DomainError;

/// Opaque hash/verify capability
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password
    fn hash(&self, plaintext: &str) -> Result<String, DomainError>;

    /// Check a plaintext password against a stored hash
    fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, DomainError>;
}

/// bcrypt with a configurable work factor
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// `cost` must lie in bcrypt's accepted range (4..=31)
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, plaintext: &str) -> Result<String, DomainError> {
        bcrypt::hash(plaintext, self.cost).map_err(|e| DomainError::Internal {
            message: format!("Password hashing failed: {}", e),
        })
    }

    fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, DomainError> {
        match bcrypt::verify(plaintext, hash) {
            Ok(matches) => Ok(matches),
            Err(e) => {
                // A corrupt stored hash never authenticates anyone
                warn!("Stored password hash is unreadable: {}", e);
                Ok(false)
            }
        }
    }
}
