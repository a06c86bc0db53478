//! In-memory implementation of UserRepository

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError};

use super::trait_::UserRepository;

/// Process-local user store keyed by user id
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<BTreeMap<String, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().cloned().collect())
    }

    async fn exists_by_id(&self, id: &str) -> Result<bool, DomainError> {
        let users = self.users.read().await;
        Ok(users.contains_key(id))
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().any(|u| u.username == username))
    }

    async fn exists_by_role(&self, role_id: &str) -> Result<bool, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().any(|u| u.role_id == role_id))
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.username == user.username) {
            return Err(AuthError::UserAlreadyExists {
                username: user.username,
            }
            .into());
        }
        if users.contains_key(&user.id) {
            return Err(DomainError::Validation {
                message: format!("User id {} is already taken", user.id),
            });
        }

        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id) {
            return Err(DomainError::NotFound {
                resource: format!("User {}", user.id),
            });
        }
        if users
            .values()
            .any(|u| u.username == user.username && u.id != user.id)
        {
            return Err(AuthError::UserAlreadyExists {
                username: user.username,
            }
            .into());
        }

        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;
        Ok(users.remove(id).is_some())
    }
}
