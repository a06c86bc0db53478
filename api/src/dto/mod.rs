//! Request and response bodies

pub mod auth;
pub mod user;

pub use auth::{LoginRequest, LogoutResponse, TokenResponse, ValidateResponse};
pub use user::{
    ChangePasswordRequest, CreateUserRequest, RoleAssignmentRequest, SuperAdminRequest,
    UpdateUserRequest,
};
