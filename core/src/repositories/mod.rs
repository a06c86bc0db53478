//! Repository interfaces and their in-memory implementations

pub mod role;
pub mod user;

pub use role::{InMemoryRoleRepository, RoleRepository};
pub use user::{InMemoryUserRepository, UserRepository};
