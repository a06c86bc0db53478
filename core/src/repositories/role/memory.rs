//! In-memory implementation of RoleRepository

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::entities::role::Role;
use crate::errors::DomainError;

use super::trait_::RoleRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryRoleRepository {
    roles: Arc<RwLock<HashMap<String, Role>>>,
}

impl InMemoryRoleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoleRepository for InMemoryRoleRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Role>, DomainError> {
        let roles = self.roles.read().await;
        Ok(roles.get(id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Role>, DomainError> {
        let roles = self.roles.read().await;
        Ok(roles.values().cloned().collect())
    }

    async fn exists_by_id(&self, id: &str) -> Result<bool, DomainError> {
        let roles = self.roles.read().await;
        Ok(roles.contains_key(id))
    }

    async fn save(&self, role: Role) -> Result<Role, DomainError> {
        let mut roles = self.roles.write().await;
        roles.insert(role.id.clone(), role.clone());
        Ok(role)
    }
}
