//! Token service module for JWT management
//!
//! This module handles all token-related operations including:
//! - RS256 key loading with one-shot caching
//! - Token issuance and verification
//! - Revocation on logout and refresh
//! - Background sweeping of stale revocation entries

mod cleanup;
mod config;
mod issuer;
mod key_manager;
mod revocation;
mod service;
mod validator;

#[cfg(test)]
mod tests;

pub use cleanup::{CleanupResult, RevocationCleanupConfig, RevocationCleanupService};
pub use config::TokenServiceConfig;
pub use issuer::TokenIssuer;
pub use key_manager::KeyProvider;
pub use revocation::RevocationStore;
pub use service::TokenLifecycleService;
pub use validator::TokenValidator;
