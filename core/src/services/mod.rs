//! Business services containing domain logic and use cases.

pub mod auth;
pub mod authorization;
pub mod events;
pub mod password;
pub mod role;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use auth::AuthService;
pub use authorization::AuthorizationGuard;
pub use events::{EventPublisher, TracingEventPublisher, UserEvent};
pub use password::{BcryptPasswordHasher, PasswordHasher};
pub use role::RoleService;
pub use token::{
    CleanupResult, KeyProvider, RevocationCleanupConfig, RevocationCleanupService,
    RevocationStore, TokenIssuer, TokenLifecycleService, TokenServiceConfig, TokenValidator,
};
pub use user::UserService;
