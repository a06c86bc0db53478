//! Shared utilities and common types for the user/role administration server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the process environment
//! - Error response structures and stable error codes

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, ConfigError, Environment, JwtConfig, LogFormat, LoggingConfig, ServerConfig,
};
pub use errors::{error_codes, ErrorResponse};
