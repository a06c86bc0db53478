//! Periodic maintenance of the revocation set
//!
//! Revocation entries outlive their token only as long as the token could
//! still be refreshed. This module sweeps the entries past that point.

use std::sync::Arc;

use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use urm_shared::config::auth::DEFAULT_CLEANUP_INTERVAL_SECONDS;
use urm_shared::JwtConfig;

use super::revocation::RevocationStore;

/// Configuration for revocation cleanup service
#[derive(Debug, Clone)]
pub struct RevocationCleanupConfig {
    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
    /// Whether to enable automatic cleanup
    pub enabled: bool,
}

impl Default for RevocationCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: DEFAULT_CLEANUP_INTERVAL_SECONDS,
            enabled: true,
        }
    }
}

impl From<&JwtConfig> for RevocationCleanupConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            interval_seconds: config.revocation_cleanup_interval_seconds,
            enabled: true,
        }
    }
}

/// Service for sweeping stale revocation entries
pub struct RevocationCleanupService {
    store: Arc<RevocationStore>,
    config: RevocationCleanupConfig,
}

impl RevocationCleanupService {
    /// Create a new cleanup service
    pub fn new(store: Arc<RevocationStore>, config: RevocationCleanupConfig) -> Self {
        Self { store, config }
    }

    /// Run a single cleanup cycle
    pub fn run_cleanup(&self) -> CleanupResult {
        if !self.config.enabled {
            return CleanupResult::default();
        }

        let entries_pruned = self.store.prune_expired(Utc::now());
        let result = CleanupResult {
            entries_pruned,
            entries_remaining: self.store.len(),
        };

        info!(
            "Revocation cleanup completed - Pruned: {}, Remaining: {}",
            result.entries_pruned, result.entries_remaining
        );
        result
    }

    /// Start the cleanup service as a background task
    ///
    /// Must be called from within a tokio runtime. Returns `None` when the
    /// service is disabled.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.config.enabled {
            warn!("Revocation cleanup service is disabled");
            return None;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds.max(1));

        Some(tokio::spawn(async move {
            info!(
                "Revocation cleanup service started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);
            loop {
                interval_timer.tick().await;
                self.run_cleanup();
            }
        }))
    }
}

/// Result of a cleanup operation
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleanupResult {
    /// Number of stale revocation entries removed
    pub entries_pruned: usize,
    /// Entries still tracked after the sweep
    pub entries_remaining: usize,
}
