//! Role repository trait for the role catalog

use async_trait::async_trait;

use crate::domain::entities::role::Role;
use crate::errors::DomainError;

/// Repository trait for Role catalog persistence
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Find a role by its identifier (exact match on the canonical id)
    async fn find_by_id(&self, id: &str) -> Result<Option<Role>, DomainError>;

    /// Every catalog entry
    async fn find_all(&self) -> Result<Vec<Role>, DomainError>;

    async fn exists_by_id(&self, id: &str) -> Result<bool, DomainError>;

    /// Insert or replace a role
    async fn save(&self, role: Role) -> Result<Role, DomainError>;
}
