//! # Cache Engine
//!
//! The state machine that decides when to trust the persisted snapshot
//! versus refetch from the remote, and how to degrade when the remote is
//! unreachable.
//!
//! ## Read path (`get_directories`)
//!
//! ```text
//! fresh snapshot + readable  ──────────────► serve from disk
//! forced / expired / absent / unreadable ──► fetch remote
//!     fetch ok   ──► save (warn on failure) ──► serve fresh data
//!     fetch fail ──► readable snapshot?  yes ──► serve stale
//!                                        no  ──► RemoteUnavailable
//! ```
//!
//! Implicit reads degrade to stale data so the tool keeps working offline.
//! [`CacheEngine::sync`] is the opposite: an explicit refresh that always
//! contacts the remote and surfaces every failure, so it stays trustworthy
//! as a health check.
//!
//! Cancellation is checked before the fetch and again between fetch and
//! save: a cancelled operation never writes a partial snapshot.

use chrono::{DateTime, Duration, Utc};

use crate::error::{DirdexError, Result};
use crate::model::Directory;
use crate::remote::{CancelToken, RemoteFetcher};
use crate::store::{CacheMetadata, CacheStore};

/// Pure freshness decision: a snapshot aged exactly `ttl` is still fresh.
/// A zero (or negative) TTL disables the cache — every read refetches.
pub fn is_fresh(meta: &CacheMetadata, ttl: Duration, now: DateTime<Utc>) -> bool {
    if ttl <= Duration::zero() {
        return false;
    }
    now.signed_duration_since(meta.last_updated) <= ttl
}

/// Derived cache lifecycle state. Recomputed on every evaluation, never
/// stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    Absent,
    Fresh,
    Expired,
    Unreadable,
}

/// Snapshot of the cache for status displays.
#[derive(Debug, Clone)]
pub struct CacheStatus {
    pub present: bool,
    pub valid: bool,
    pub count: usize,
    pub last_updated: Option<DateTime<Utc>>,
    pub age: Option<Duration>,
}

/// Orchestrates the persisted store and the remote fetcher.
pub struct CacheEngine<S: CacheStore, R: RemoteFetcher> {
    store: S,
    remote: R,
    ttl: Duration,
}

impl<S: CacheStore, R: RemoteFetcher> CacheEngine<S, R> {
    pub fn new(store: S, remote: R, ttl: Duration) -> Self {
        Self { store, remote, ttl }
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// Evaluate the current cache state without touching the remote.
    pub fn state(&self, now: DateTime<Utc>) -> CacheState {
        match self.store.load_metadata() {
            Ok(meta) => {
                // Metadata alone is not a usable cache; the collection
                // artifact must parse too.
                if self.store.load().is_err() {
                    return CacheState::Unreadable;
                }
                if is_fresh(&meta, self.ttl, now) {
                    CacheState::Fresh
                } else {
                    CacheState::Expired
                }
            }
            Err(_) => match self.store.load() {
                Ok(_) => CacheState::Unreadable,
                Err(_) => CacheState::Absent,
            },
        }
    }

    /// The current collection, served from cache when fresh, refetched
    /// otherwise, falling back to any readable stale snapshot if the
    /// remote fails.
    pub fn get_directories(
        &mut self,
        cancel: &CancelToken,
        force_refresh: bool,
    ) -> Result<Vec<Directory>> {
        let now = Utc::now();

        if !force_refresh && self.state(now) == CacheState::Fresh {
            match self.store.load() {
                Ok(records) => {
                    tracing::debug!(count = records.len(), "serving directories from cache");
                    return Ok(records);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "fresh cache failed to load, refetching");
                }
            }
        }

        match self.remote.fetch_all(cancel, None) {
            Ok(records) => {
                if cancel.is_cancelled() {
                    return Err(DirdexError::Cancelled);
                }
                if let Err(e) = self.store.save(&records) {
                    // The caller still gets fresh data; only the next
                    // invocation pays for the failed write.
                    tracing::warn!(error = %e, "failed to save cache");
                }
                Ok(records)
            }
            Err(DirdexError::Cancelled) => Err(DirdexError::Cancelled),
            Err(fetch_err) => match self.store.load() {
                Ok(records) => {
                    tracing::warn!(error = %fetch_err, "remote failed, serving stale cache");
                    Ok(records)
                }
                Err(_) => Err(fetch_err),
            },
        }
    }

    /// Explicit refresh: always contacts the remote, never masks failure
    /// with stale data. Returns the number of records synced.
    pub fn sync(&mut self, cancel: &CancelToken) -> Result<usize> {
        let records = self.remote.fetch_all(cancel, None)?;
        if cancel.is_cancelled() {
            return Err(DirdexError::Cancelled);
        }
        self.store.save(&records)?;
        tracing::debug!(count = records.len(), "cache synced");
        Ok(records.len())
    }

    pub fn status(&self) -> CacheStatus {
        let now = Utc::now();
        match self.store.load_metadata() {
            Ok(meta) => CacheStatus {
                present: true,
                valid: self.state(now) == CacheState::Fresh,
                count: meta.count,
                age: Some(now.signed_duration_since(meta.last_updated)),
                last_updated: Some(meta.last_updated),
            },
            Err(_) => CacheStatus {
                present: false,
                valid: false,
                count: 0,
                age: None,
                last_updated: None,
            },
        }
    }

    pub fn clear(&mut self) -> Result<()> {
        self.store.clear()
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{sample, FakeFetcher};
    use super::*;
    use crate::store::memory::InMemoryStore;

    fn meta_aged(age: Duration) -> CacheMetadata {
        CacheMetadata {
            last_updated: Utc::now() - age,
            version: crate::store::CACHE_VERSION.to_string(),
            count: 0,
        }
    }

    #[test]
    fn test_freshness_boundary_inclusive() {
        let ttl = Duration::hours(24);
        let now = Utc::now();
        let meta = CacheMetadata {
            last_updated: now - ttl,
            version: crate::store::CACHE_VERSION.to_string(),
            count: 0,
        };

        // Age exactly equal to TTL is still fresh.
        assert!(is_fresh(&meta, ttl, now));
        // One second past the boundary is not.
        assert!(!is_fresh(&meta, ttl, now + Duration::seconds(1)));
    }

    #[test]
    fn test_zero_ttl_is_never_fresh() {
        let meta = meta_aged(Duration::zero());
        assert!(!is_fresh(&meta, Duration::zero(), meta.last_updated));
    }

    #[test]
    fn test_fresh_cache_skips_remote() {
        let store = InMemoryStore::seeded(vec![sample("cached")], Utc::now());
        let fetcher = FakeFetcher::returning(vec![sample("remote")]);
        let mut engine = CacheEngine::new(store, fetcher, Duration::hours(24));

        let records = engine.get_directories(&CancelToken::new(), false).unwrap();
        assert_eq!(records[0].slug, "cached");
        assert_eq!(engine.remote.calls.get(), 0);
    }

    #[test]
    fn test_expired_cache_refetches_and_saves() {
        let store = InMemoryStore::seeded(vec![sample("old")], Utc::now() - Duration::days(2));
        let fetcher = FakeFetcher::returning(vec![sample("new")]);
        let mut engine = CacheEngine::new(store, fetcher, Duration::hours(24));

        let records = engine.get_directories(&CancelToken::new(), false).unwrap();
        assert_eq!(records[0].slug, "new");
        assert_eq!(engine.store.saved_records().unwrap()[0].slug, "new");
    }

    #[test]
    fn test_forced_refresh_bypasses_fresh_cache() {
        let store = InMemoryStore::seeded(vec![sample("old")], Utc::now());
        let fetcher = FakeFetcher::returning(vec![sample("new")]);
        let mut engine = CacheEngine::new(store, fetcher, Duration::hours(24));

        let records = engine.get_directories(&CancelToken::new(), true).unwrap();
        assert_eq!(records[0].slug, "new");
        assert_eq!(engine.store.saved_records().unwrap()[0].slug, "new");
    }

    #[test]
    fn test_stale_fallback_when_remote_fails() {
        let store = InMemoryStore::seeded(
            vec![sample("stale-a"), sample("stale-b")],
            Utc::now() - Duration::days(30),
        );
        let fetcher = FakeFetcher::failing();
        let mut engine = CacheEngine::new(store, fetcher, Duration::hours(24));

        let records = engine.get_directories(&CancelToken::new(), false).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_no_cache_and_remote_down_propagates() {
        let mut engine = CacheEngine::new(
            InMemoryStore::new(),
            FakeFetcher::failing(),
            Duration::hours(24),
        );

        assert!(matches!(
            engine.get_directories(&CancelToken::new(), false),
            Err(DirdexError::RemoteUnavailable(_))
        ));
    }

    #[test]
    fn test_save_failure_does_not_fail_the_read() {
        let mut store = InMemoryStore::new();
        store.fail_saves = true;
        let fetcher = FakeFetcher::returning(vec![sample("fresh")]);
        let mut engine = CacheEngine::new(store, fetcher, Duration::hours(24));

        let records = engine.get_directories(&CancelToken::new(), false).unwrap();
        assert_eq!(records[0].slug, "fresh");
        assert_eq!(engine.store.save_calls, 1);
    }

    #[test]
    fn test_sync_surfaces_remote_failure() {
        let store = InMemoryStore::seeded(vec![sample("stale")], Utc::now() - Duration::days(2));
        let mut engine = CacheEngine::new(store, FakeFetcher::failing(), Duration::hours(24));

        // Same remote, same stale snapshot — but sync must not mask it.
        assert!(matches!(
            engine.sync(&CancelToken::new()),
            Err(DirdexError::RemoteUnavailable(_))
        ));
    }

    #[test]
    fn test_sync_surfaces_save_failure() {
        let mut store = InMemoryStore::new();
        store.fail_saves = true;
        let fetcher = FakeFetcher::returning(vec![sample("fresh")]);
        let mut engine = CacheEngine::new(store, fetcher, Duration::hours(24));

        assert!(matches!(
            engine.sync(&CancelToken::new()),
            Err(DirdexError::Persist(_))
        ));
    }

    #[test]
    fn test_sync_reports_count() {
        let fetcher = FakeFetcher::returning(vec![sample("a"), sample("b"), sample("c")]);
        let mut engine = CacheEngine::new(InMemoryStore::new(), fetcher, Duration::hours(24));

        assert_eq!(engine.sync(&CancelToken::new()).unwrap(), 3);
    }

    #[test]
    fn test_cancellation_between_fetch_and_save() {
        let token = CancelToken::new();
        token.cancel();

        let fetcher = FakeFetcher::returning(vec![sample("fresh")]);
        let mut engine = CacheEngine::new(InMemoryStore::new(), fetcher, Duration::hours(24));

        assert!(matches!(
            engine.get_directories(&token, false),
            Err(DirdexError::Cancelled)
        ));
        // The snapshot was never written.
        assert!(engine.store.saved_records().is_none());
        assert_eq!(engine.store.save_calls, 0);
    }

    #[test]
    fn test_state_transitions() {
        let now = Utc::now();
        let ttl = Duration::hours(24);

        let engine = CacheEngine::new(InMemoryStore::new(), FakeFetcher::failing(), ttl);
        assert_eq!(engine.state(now), CacheState::Absent);

        let engine = CacheEngine::new(
            InMemoryStore::seeded(vec![sample("x")], now),
            FakeFetcher::failing(),
            ttl,
        );
        assert_eq!(engine.state(now), CacheState::Fresh);

        let engine = CacheEngine::new(
            InMemoryStore::seeded(vec![sample("x")], now - Duration::days(3)),
            FakeFetcher::failing(),
            ttl,
        );
        assert_eq!(engine.state(now), CacheState::Expired);

        let mut store = InMemoryStore::seeded(vec![sample("x")], now);
        store.fail_loads = true;
        let engine = CacheEngine::new(store, FakeFetcher::failing(), ttl);
        assert_eq!(engine.state(now), CacheState::Absent);
    }

    #[test]
    fn test_status_reflects_metadata() {
        let engine = CacheEngine::new(
            InMemoryStore::seeded(vec![sample("a"), sample("b")], Utc::now()),
            FakeFetcher::failing(),
            Duration::hours(24),
        );

        let status = engine.status();
        assert!(status.present);
        assert!(status.valid);
        assert_eq!(status.count, 2);
        assert!(status.age.unwrap() < Duration::minutes(1));

        let engine = CacheEngine::new(
            InMemoryStore::new(),
            FakeFetcher::failing(),
            Duration::hours(24),
        );
        let status = engine.status();
        assert!(!status.present);
        assert!(!status.valid);
    }

    #[test]
    fn test_clear_then_read_goes_remote() {
        let store = InMemoryStore::seeded(vec![sample("cached")], Utc::now());
        let fetcher = FakeFetcher::returning(vec![sample("remote")]);
        let mut engine = CacheEngine::new(store, fetcher, Duration::hours(24));

        engine.clear().unwrap();
        let records = engine.get_directories(&CancelToken::new(), false).unwrap();
        assert_eq!(records[0].slug, "remote");
        assert_eq!(engine.remote.calls.get(), 1);
    }
}
