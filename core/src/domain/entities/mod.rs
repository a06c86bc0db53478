//! Domain entities representing core business objects.

pub mod role;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use role::{Role, RoleLevel};
pub use token::{Claims, IssuedToken};
pub use user::{NewUser, User, UserProfile, UserUpdate, SUPER_ADMIN_ID};
