use std::sync::Arc;

use tracing::info;

use crate::domain::entities::role::{Role, RoleLevel};
use crate::domain::entities::token::Claims;
use crate::errors::{AuthError, DomainResult};
use crate::repositories::{RoleRepository, UserRepository};
use crate::services::authorization::AuthorizationGuard;
use crate::services::events::{publish_or_warn, EventPublisher, UserEvent};

/// Role catalog queries, role assignment and privilege checks
pub struct RoleService<R, U, E>
where
    R: RoleRepository,
    U: UserRepository,
    E: EventPublisher,
{
    role_repository: Arc<R>,
    user_repository: Arc<U>,
    events: Arc<E>,
    guard: AuthorizationGuard,
}

impl<R, U, E> RoleService<R, U, E>
where
    R: RoleRepository,
    U: UserRepository,
    E: EventPublisher,
{
    pub fn new(
        role_repository: Arc<R>,
        user_repository: Arc<U>,
        events: Arc<E>,
        guard: AuthorizationGuard,
    ) -> Self {
        Self {
            role_repository,
            user_repository,
            events,
            guard,
        }
    }

    /// Seeds every hierarchy level missing from the catalog.
    ///
    /// Returns the number of roles created; existing entries are untouched.
    pub async fn initialize_roles(&self) -> DomainResult<usize> {
        let mut created = 0;
        for level in RoleLevel::ALL.into_iter().rev() {
            if !self.role_repository.exists_by_id(level.role_id()).await? {
                self.role_repository.save(level.catalog_entry()).await?;
                created += 1;
            }
        }
        if created > 0 {
            info!("Seeded {} roles", created);
        }
        Ok(created)
    }

    /// All catalog roles, highest privilege first
    pub async fn list_roles(&self) -> DomainResult<Vec<Role>> {
        let mut roles = self.role_repository.find_all().await?;
        roles.sort_by_key(|role| std::cmp::Reverse(role.level().ok()));
        Ok(roles)
    }

    /// Catalog entry for `role_id` (case-insensitive)
    pub async fn find_by_id(&self, role_id: &str) -> DomainResult<Option<Role>> {
        let canonical = canonical_role_id(role_id);
        self.role_repository.find_by_id(&canonical).await
    }

    /// Requires the token to carry at least `minimum`
    pub fn check_role(&self, token: &str, minimum: RoleLevel) -> DomainResult<Claims> {
        self.guard.require(token, minimum)
    }

    /// Assigns `role_id` to the user.
    ///
    /// Returns `false` when the user already holds the role.
    ///
    /// # Errors
    ///
    /// * `AuthError::UserNotFound` - no such user
    /// * `AuthError::RoleNotFound` - no such catalog role
    pub async fn assign_role(&self, user_id: &str, role_id: &str) -> DomainResult<bool> {
        let mut user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        let role = self
            .find_by_id(role_id)
            .await?
            .ok_or_else(|| AuthError::RoleNotFound {
                role_id: role_id.to_string(),
            })?;

        if user.role_id == role.id {
            return Ok(false);
        }

        user.role_id = role.id.clone();
        let user = self.user_repository.update(user).await?;

        info!(user_id = %user.id, role = %role.id, "Assigned role");
        publish_or_warn(
            self.events.as_ref(),
            UserEvent::role_assigned(&user.id, &role.id),
        )
        .await;
        Ok(true)
    }
}

fn canonical_role_id(role_id: &str) -> String {
    RoleLevel::from_role_id(role_id)
        .map(|level| level.role_id().to_string())
        .unwrap_or_else(|_| role_id.to_string())
}
