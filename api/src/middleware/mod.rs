//! Middleware modules for the API

pub mod auth;

pub use auth::{AuthContext, BearerToken, RequireRole};
