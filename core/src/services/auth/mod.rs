//! Authentication service module
//!
//! This module provides the credential flow around the token lifecycle:
//! - User registration
//! - Login with username and password
//! - Logout, token refresh and validation

mod service;


pub use service::AuthService;
