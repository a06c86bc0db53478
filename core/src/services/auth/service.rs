//! Main authentication service implementation

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::entities::role::RoleLevel;
use crate::domain::entities::token::IssuedToken;
use crate::domain::entities::user::{NewUser, User};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::UserRepository;
use crate::services::events::{publish_or_warn, EventPublisher, UserEvent};
use crate::services::password::PasswordHasher;
use crate::services::token::TokenLifecycleService;

/// Attempts at drawing an unused six-digit id before giving up
const MAX_ID_ATTEMPTS: usize = 32;

/// Authentication service for registration, login and session tokens
pub struct AuthService<U, H, E>
where
    U: UserRepository,
    H: PasswordHasher,
    E: EventPublisher,
{
    /// User repository for account lookups
    user_repository: Arc<U>,
    /// Password hash/verify capability
    password_hasher: Arc<H>,
    /// Sink for user.created events
    events: Arc<E>,
    /// Token lifecycle (issue, logout, refresh)
    tokens: Arc<TokenLifecycleService>,
}

impl<U, H, E> AuthService<U, H, E>
where
    U: UserRepository,
    H: PasswordHasher,
    E: EventPublisher,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for user data persistence
    /// * `password_hasher` - Hashing capability for stored passwords
    /// * `events` - Publisher for account events
    /// * `tokens` - Token lifecycle service
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

    /// Register a new user
    ///
    /// # Errors
    ///
    /// * `DomainError::Validation` - a required field is blank
    /// * `AuthError::UnknownRole` - role is not in the hierarchy
    /// * `AuthError::RegistrationForbidden` - attempted to register a super admin
    /// * `AuthError::UserAlreadyExists` - username is taken
    pub async fn register(&self, mut data: NewUser) -> DomainResult<User> {
        let missing = data.missing_fields();
        if !missing.is_empty() {
            return Err(DomainError::Validation {
                message: format!("Missing required fields: {}", missing.join(", ")),
            });
        }

        let level = RoleLevel::from_role_id(&data.role_id)?;
        if level == RoleLevel::SuperAdmin {
            warn!(username = %data.username, "Rejected registration of a super admin");
            return Err(AuthError::RegistrationForbidden { role: level }.into());
        }
        data.role_id = level.role_id().to_string();

        if self.user_repository.exists_by_username(&data.username).await? {
            return Err(AuthError::UserAlreadyExists {
                username: data.username,
            }
            .into());
        }

        let password_hash = self.password_hasher.hash(&data.password)?;
        let id = self.unused_id().await?;
        let user = self
            .user_repository
            .create(User::new(id, data, password_hash))
            .await?;

        info!(user_id = %user.id, role = %user.role_id, "Registered user");
        publish_or_warn(self.events.as_ref(), UserEvent::created(&user)).await;
        Ok(user)
    }

    /// Authenticate with username and password and issue a session token
    ///
    /// Unknown usernames and wrong passwords fail identically.
    pub async fn login(&self, username: &str, password: &str) -> DomainResult<IssuedToken> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AuthError::InvalidCredentials.into());
        }

        let mut user = match self.user_repository.find_by_username(username).await? {
            Some(user) => user,
            None => {
                warn!("Login attempt for unknown username");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        if !self.password_hasher.verify(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login attempt with wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        user.record_login();
        let user = self.user_repository.update(user).await?;

        info!(user_id = %user.id, "User logged in");
        self.tokens.issue(&user.id, &user.username, &user.role_id)
    }

    /// Revoke the session token; never fails
    pub fn logout(&self, token: &str) {
        self.tokens.logout(token);
    }

    /// Exchange a token for a fresh one, revoking the old token
    pub fn refresh(&self, token: &str) -> DomainResult<IssuedToken> {
        self.tokens.refresh(token)
    }

    /// Whether the token is currently usable
    pub fn validate(&self, token: &str) -> bool {
        self.tokens.is_valid(token)
    }

    async fn unused_id(&self) -> DomainResult<String> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate = User::generate_id();
            if !self.user_repository.exists_by_id(&candidate).await? {
                return Ok(candidate);
            }
        }
        Err(DomainError::Internal {
            message: "Could not allocate a free user id".to_string(),
        })
    }
}
