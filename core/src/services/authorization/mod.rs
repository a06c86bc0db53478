//! Role-based access control over validated tokens

mod guard;


pub use guard::AuthorizationGuard;
