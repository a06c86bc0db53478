//! Error types for token lifecycle and authorization failures

use thiserror::Error;

use crate::domain::entities::role::RoleLevel;

/// Token-related errors
///
/// `MalformedToken` signals a corrupt or forged input; `Expired` and
/// `Revoked` are ordinary terminal lifecycle states.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Malformed token or signature mismatch")]
    MalformedToken,

    #[error("Token expired")]
    Expired,

    #[error("Token revoked")]
    Revoked,

    #[error("Token already revoked, refresh is not possible")]
    AlreadyRevoked,

    #[error("Token generation failed: {message}")]
    IssueFailed { message: String },
}

/// Authentication and authorization errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Token invalid or expired or revoked: {0}")]
    Unauthenticated(#[source] TokenError),

    #[error("Insufficient privilege: requires {required}, caller has {actual}")]
    Forbidden {
        required: RoleLevel,
        actual: RoleLevel,
    },

    /// A role identifier that is absent from the hierarchy. Data integrity
    /// problem, not a permission failure.
    #[error("Unknown role identifier: {role}")]
    UnknownRole { role: String },

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("User already exists: {username}")]
    UserAlreadyExists { username: String },

    #[error("User not found")]
    UserNotFound,

    #[error("Role not found: {role_id}")]
    RoleNotFound { role_id: String },

    #[error("A super administrator already exists")]
    SuperAdminExists,

    #[error("Registration of role {role} is not allowed")]
    RegistrationForbidden { role: RoleLevel },
}
