//! In-process revocation set for signed tokens

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;

/// Number of inserts between opportunistic sweeps
const PRUNE_EVERY: u64 = 1024;

/// Concurrent set of revoked token strings.
///
/// Each entry remembers the instant after which it can be forgotten
/// (`retain_until`, a unix timestamp). The map is sharded, so inserts and
/// lookups of unrelated tokens do not contend on one lock.
#[derive(Debug, Default)]
pub struct RevocationStore {
    entries: DashMap<String, i64>,
    inserts: AtomicU64,
}

impl RevocationStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `token` as revoked until at least `retain_until`.
    ///
    /// Returns `true` when this call inserted the token and `false` when it
    /// was already revoked. The check and the insert happen under the same
    /// shard lock, so concurrent callers for one token see exactly one `true`.
    pub fn revoke(&self, token: &str, retain_until: DateTime<Utc>) -> bool {
        let until = retain_until.timestamp();
        let inserted = match self.entries.entry(token.to_string()) {
            Entry::Occupied(mut existing) => {
                if *existing.get() < until {
                    existing.insert(until);
                }
                false
            }
            Entry::Vacant(slot) => {
                slot.insert(until);
                true
            }
        };

        // The shard guard is released above; sweeping needs every shard.
        if inserted && (self.inserts.fetch_add(1, Ordering::Relaxed) + 1) % PRUNE_EVERY == 0 {
            self.prune_expired(Utc::now());
        }
        inserted
    }

    /// Whether `token` has been revoked
    pub fn contains(&self, token: &str) -> bool {
        self.entries.contains_key(token)
    }

    /// Drops every entry whose retention window closed at or before `now`
    pub fn prune_expired(&self, now: DateTime<Utc>) -> usize {
        let now = now.timestamp();
        let mut removed = 0;
        self.entries.retain(|_, until| {
            let keep = *until > now;
            if !keep {
                removed += 1;
            }
            keep
        });
        if removed > 0 {
            debug!("Pruned {} revocation entries", removed);
        }
        removed
    }

    /// Number of tracked revocations
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
