//! User repository trait defining the interface for user data persistence.
//!
//! The trait is async-first so that a database-backed implementation can be
//! dropped in without touching the services.

use async_trait::async_trait;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by identifier
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with the given id
    /// * `Err(DomainError)` - Storage error
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by login name (exact match)
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// All users, ordered by identifier
    async fn find_all(&self) -> Result<Vec<User>, DomainError>;

    async fn exists_by_id(&self, id: &str) -> Result<bool, DomainError>;

    async fn exists_by_username(&self, username: &str) -> Result<bool, DomainError>;

    /// Whether any user currently holds `role_id`
    async fn exists_by_role(&self, role_id: &str) -> Result<bool, DomainError>;

    /// Persist a new user
    ///
    /// # Returns
    /// * `Ok(User)` - The stored user
    /// * `Err(DomainError)` - Duplicate id or username, or storage error
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Replace an existing user
    ///
    /// # Returns
    /// * `Ok(User)` - The updated user
    /// * `Err(DomainError::NotFound)` - No user with that id
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// Delete a user
    ///
    /// # Returns
    /// * `Ok(true)` - User was deleted
    /// * `Ok(false)` - User not found
    async fn delete(&self, id: &str) -> Result<bool, DomainError>;
}
