//! Application state shared by every worker

use std::sync::Arc;

use urm_core::errors::DomainResult;
use urm_core::repositories::{InMemoryRoleRepository, InMemoryUserRepository};
use urm_core::services::{
    AuthService, AuthorizationGuard, BcryptPasswordHasher, KeyProvider, RevocationStore,
    RoleService, TokenLifecycleService, TokenServiceConfig, TracingEventPublisher, UserService,
};

pub type AppAuthService =
    AuthService<InMemoryUserRepository, BcryptPasswordHasher, TracingEventPublisher>;
pub type AppUserService =
    UserService<InMemoryUserRepository, BcryptPasswordHasher, TracingEventPublisher>;
pub type AppRoleService =
    RoleService<InMemoryRoleRepository, InMemoryUserRepository, TracingEventPublisher>;

/// Services wired over the in-memory repositories
pub struct AppState {
    pub auth_service: AppAuthService,
    pub user_service: AppUserService,
    pub role_service: AppRoleService,
    pub guard: AuthorizationGuard,
    pub tokens: Arc<TokenLifecycleService>,
}

impl AppState {
    /// Wires the services around one key provider and one revocation store
    pub fn new(
        keys: Arc<KeyProvider>,
        token_config: TokenServiceConfig,
        password_hasher: BcryptPasswordHasher,
    ) -> DomainResult<Self> {
        let tokens = Arc::new(TokenLifecycleService::new(
            keys,
            Arc::new(RevocationStore::new()),
            token_config,
        )?);
        let guard = AuthorizationGuard::new(tokens.validator());

        let users = Arc::new(InMemoryUserRepository::new());
        let roles = Arc::new(InMemoryRoleRepository::new());
        let hasher = Arc::new(password_hasher);
        let events = Arc::new(TracingEventPublisher);

        Ok(Self {
            auth_service: AuthService::new(
                users.clone(),
                hasher.clone(),
                events.clone(),
                tokens.clone(),
            ),
            user_service: UserService::new(users.clone(), hasher, events.clone(), tokens.clone()),
            role_service: RoleService::new(roles, users, events, guard.clone()),
            guard,
            tokens,
        })
    }

    /// Seeds the role catalog
    pub async fn initialize(&self) -> DomainResult<()> {
        self.role_service.initialize_roles().await?;
        Ok(())
    }
}
