//! # Core
//!
//! Domain layer of the user and role administration backend: entities,
//! the token lifecycle, role-based authorization, account services,
//! repository interfaces and error types.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types for convenience
pub use domain::{Claims, IssuedToken, NewUser, Role, RoleLevel, User, UserProfile, UserUpdate};
pub use errors::{AuthError, DomainError, DomainResult, TokenError};
pub use repositories::{InMemoryRoleRepository, InMemoryUserRepository, RoleRepository, UserRepository};
pub use services::{
    AuthService, AuthorizationGuard, BcryptPasswordHasher, EventPublisher, KeyProvider,
    PasswordHasher, RevocationCleanupService, RoleService, TokenLifecycleService,
    TokenServiceConfig, UserService,
};
