//! Unit tests for the revocation store and its cleanup service

use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::services::token::{
    RevocationCleanupConfig, RevocationCleanupService, RevocationStore,
};

#[test]
fn test_revoke_is_test_and_set() {
    let store = RevocationStore::new();
    let until = Utc::now() + Duration::hours(1);

    assert!(store.revoke("token-a", until));
    assert!(!store.revoke("token-a", until));
    assert!(store.contains("token-a"));
    assert!(!store.contains("token-b"));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_concurrent_revokes_of_distinct_tokens() {
    let store = Arc::new(RevocationStore::new());
    let until = Utc::now() + Duration::hours(1);

    std::thread::scope(|scope| {
        for i in 0..64 {
            let store = Arc::clone(&store);
            scope.spawn(move || {
                assert!(store.revoke(&format!("token-{}", i), until));
            });
        }
    });

    assert_eq!(store.len(), 64);
    assert!((0..64).all(|i| store.contains(&format!("token-{}", i))));
}

#[test]
fn test_concurrent_revokes_of_one_token_have_one_winner() {
    let store = Arc::new(RevocationStore::new());
    let until = Utc::now() + Duration::hours(1);

    let winners: usize = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..32)
            .map(|_| {
                let store = Arc::clone(&store);
                scope.spawn(move || store.revoke("shared", until))
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap() as usize)
            .sum()
    });

    assert_eq!(winners, 1);
}

#[test]
fn test_prune_removes_only_closed_entries() {
    let store = RevocationStore::new();
    let now = Utc::now();

    store.revoke("stale", now - Duration::seconds(1));
    store.revoke("boundary", now);
    store.revoke("live", now + Duration::seconds(60));

    assert_eq!(store.prune_expired(now), 2);
    assert!(store.contains("live"));
    assert!(!store.contains("stale"));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_every_1024th_insert_sweeps_closed_entries() {
    let store = RevocationStore::new();
    let closed = Utc::now() - Duration::minutes(1);
    let open = Utc::now() + Duration::hours(1);

    for i in 0..1023 {
        assert!(store.revoke(&format!("stale-{}", i), closed));
    }
    assert_eq!(store.len(), 1023);

    // Re-revoking does not count as an insert.
    assert!(!store.revoke("stale-0", closed));
    assert_eq!(store.len(), 1023);

    assert!(store.revoke("fresh", open));
    assert_eq!(store.len(), 1);
    assert!(store.contains("fresh"));
    assert!(!store.contains("stale-0"));
}

#[test]
fn test_re_revoke_extends_retention() {
    let store = RevocationStore::new();
    let now = Utc::now();

    store.revoke("token", now + Duration::seconds(10));
    store.revoke("token", now + Duration::seconds(100));

    assert_eq!(store.prune_expired(now + Duration::seconds(50)), 0);
    assert!(store.contains("token"));
}

#[test]
fn test_cleanup_service_run() {
    let store = Arc::new(RevocationStore::new());
    store.revoke("stale", Utc::now() - Duration::hours(1));
    store.revoke("live", Utc::now() + Duration::hours(1));

    let service = RevocationCleanupService::new(store.clone(), RevocationCleanupConfig::default());
    let result = service.run_cleanup();

    assert_eq!(result.entries_pruned, 1);
    assert_eq!(result.entries_remaining, 1);
    assert!(store.contains("live"));
}

#[test]
fn test_disabled_cleanup_does_nothing() {
    let store = Arc::new(RevocationStore::new());
    store.revoke("stale", Utc::now() - Duration::hours(1));

    let config = RevocationCleanupConfig {
        interval_seconds: 1,
        enabled: false,
    };
    let service = Arc::new(RevocationCleanupService::new(store.clone(), config));

    assert_eq!(service.run_cleanup(), Default::default());
    assert!(service.start_background_task().is_none());
    assert_eq!(store.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_background_cleanup_prunes_on_tick() {
    let store = Arc::new(RevocationStore::new());
    store.revoke("stale", Utc::now() - Duration::hours(1));

    let config = RevocationCleanupConfig {
        interval_seconds: 60,
        enabled: true,
    };
    let service = Arc::new(RevocationCleanupService::new(store.clone(), config));
    let handle = service.start_background_task().unwrap();

    // First tick fires immediately
    tokio::time::sleep(std::time::Duration::from_secs(1)).await;
    assert!(store.is_empty());

    handle.abort();
}
