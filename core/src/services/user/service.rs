use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::entities::role::RoleLevel;
use crate::domain::entities::user::{NewUser, User, UserProfile, UserUpdate, SUPER_ADMIN_ID};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::UserRepository;
use crate::services::events::{publish_or_warn, EventPublisher, UserEvent};
use crate::services::password::PasswordHasher;
use crate::services::token::TokenLifecycleService;

/// User administration service
pub struct UserService<U, H, E>
where
    U: UserRepository,
    H: PasswordHasher,
    E: EventPublisher,
{
    user_repository: Arc<U>,
    password_hasher: Arc<H>,
    events: Arc<E>,
    tokens: Arc<TokenLifecycleService>,
}

impl<U, H, E> UserService<U, H, E>
where
    U: UserRepository,
    H: PasswordHasher,
    E: EventPublisher,
{
    pub fn new(
        user_repository: Arc<U>,
        password_hasher: Arc<H>,
        events: Arc<E>,
        tokens: Arc<TokenLifecycleService>,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
            events,
            tokens,
        }
    }

    /// Bootstraps the single super administrator with id `000000`.
    ///
    /// The requested role is ignored.
    ///
    /// # Errors
    ///
    /// * `AuthError::SuperAdminExists` - a super admin is already present
    /// * `AuthError::UserAlreadyExists` - username is taken
    /// * `DomainError::Validation` - a required field is blank
    pub async fn create_super_admin_if_absent(&self, mut data: NewUser) -> DomainResult<User> {
        data.role_id = RoleLevel::SuperAdmin.role_id().to_string();
        let missing = data.missing_fields();
        if !missing.is_empty() {
            return Err(DomainError::Validation {
                message: format!("Missing required fields: {}", missing.join(", ")),
            });
        }

        if self.user_repository.exists_by_id(SUPER_ADMIN_ID).await?
            || self
                .user_repository
                .exists_by_role(RoleLevel::SuperAdmin.role_id())
                .await?
        {
            warn!("Rejected second super admin bootstrap");
            return Err(AuthError::SuperAdminExists.into());
        }
        if self.user_repository.exists_by_username(&data.username).await? {
            return Err(AuthError::UserAlreadyExists {
                username: data.username,
            }
            .into());
        }

        let password_hash = self.password_hasher.hash(&data.password)?;
        let user = self
            .user_repository
            .create(User::new(SUPER_ADMIN_ID, data, password_hash))
            .await?;

        info!(user_id = %user.id, "Super admin created");
        publish_or_warn(self.events.as_ref(), UserEvent::created(&user)).await;
        Ok(user)
    }

    pub async fn find_by_id(&self, id: &str) -> DomainResult<User> {
        self.user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AuthError::UserNotFound.into())
    }

    pub async fn find_by_username(&self, username: &str) -> DomainResult<User> {
        self.user_repository
            .find_by_username(username)
            .await?
            .ok_or_else(|| AuthError::UserNotFound.into())
    }

    /// Profiles of every user
    pub async fn list_users(&self) -> DomainResult<Vec<UserProfile>> {
        let users = self.user_repository.find_all().await?;
        Ok(users.iter().map(User::profile).collect())
    }

    /// Administrative update of another user's editable fields
    pub async fn update_user(&self, id: &str, update: UserUpdate) -> DomainResult<User> {
        validate_update(&update)?;
        let mut user = self.find_by_id(id).await?;
        user.apply_update(update);
        let user = self.user_repository.update(user).await?;

        info!(user_id = %user.id, "User updated");
        publish_or_warn(self.events.as_ref(), UserEvent::updated(&user)).await;
        Ok(user)
    }

    /// Deletes user `id` on behalf of `requester_id`.
    ///
    /// Returns `false` when no such user exists. Deleting oneself is refused.
    pub async fn delete_user(&self, requester_id: &str, id: &str) -> DomainResult<bool> {
        if requester_id == id {
            return Err(DomainError::Validation {
                message: "Users cannot delete their own account".to_string(),
            });
        }

        let deleted = self.user_repository.delete(id).await?;
        if deleted {
            info!(user_id = %id, "User deleted");
            publish_or_warn(self.events.as_ref(), UserEvent::deleted(id)).await;
        }
        Ok(deleted)
    }

    /// Profile of the token's subject
    pub async fn get_profile(&self, token: &str) -> DomainResult<UserProfile> {
        let user = self.token_owner(token).await?;
        Ok(user.profile())
    }

    /// Updates the token subject's own profile
    pub async fn update_profile(&self, token: &str, update: UserUpdate) -> DomainResult<UserProfile> {
        validate_update(&update)?;
        let mut user = self.token_owner(token).await?;
        user.apply_update(update);
        let user = self.user_repository.update(user).await?;

        info!(user_id = %user.id, "Profile updated");
        publish_or_warn(self.events.as_ref(), UserEvent::updated(&user)).await;
        Ok(user.profile())
    }

    /// Replaces the token subject's password.
    ///
    /// Returns `false` without changing anything when `old_password` is wrong.
    pub async fn change_password(
        &self,
        token: &str,
        old_password: &str,
        new_password: &str,
    ) -> DomainResult<bool> {
        if new_password.trim().is_empty() {
            return Err(DomainError::Validation {
                message: "New password must not be empty".to_string(),
            });
        }

        let mut user = self.token_owner(token).await?;
        if !self.password_hasher.verify(old_password, &user.password_hash)? {
            warn!(user_id = %user.id, "Password change with wrong current password");
            return Ok(false);
        }

        user.password_hash = self.password_hasher.hash(new_password)?;
        self.user_repository.update(user).await?;
        Ok(true)
    }

    async fn token_owner(&self, token: &str) -> DomainResult<User> {
        let claims = self.tokens.check(token).map_err(|e| match e {
            DomainError::Token(reason) => AuthError::Unauthenticated(reason).into(),
            other => other,
        })?;
        self.find_by_id(&claims.sub).await
    }
}

fn validate_update(update: &UserUpdate) -> DomainResult<()> {
    let blank: Vec<&str> = [
        ("username", &update.username),
        ("email", &update.email),
        ("name", &update.name),
        ("surname", &update.surname),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(field, _)| field)
    .collect();

    if blank.is_empty() {
        Ok(())
    } else {
        Err(DomainError::Validation {
            message: format!("Missing required fields: {}", blank.join(", ")),
        })
    }
}
