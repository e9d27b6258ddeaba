//! Shared TTL Cache
//!
//! Thread-safe handle around [`CacheStore`]. Every operation takes the same
//! mutex, so purge, read and write sequences are atomic to outside callers.

use chrono::Utc;
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::cache::{CacheEntry, CacheStats, CacheStore};

// == Cache Lookup ==
/// Outcome of [`TtlCache::get_or_compute`].
#[derive(Debug, Clone)]
pub struct CacheLookup<V> {
    /// The cached or freshly computed value
    pub value: V,
    /// The entry now holding the value
    pub entry: CacheEntry<V>,
    /// True when the value came from a live entry
    pub was_cache_hit: bool,
}

// == TTL Cache ==
/// In-memory key-value cache with a fixed per-cache TTL.
///
/// Expired entries are purged lazily on every access. No entry is ever
/// stored for a failed computation.
#[derive(Debug)]
pub struct TtlCache<V> {
    store: Mutex<CacheStore<V>>,
}

impl<V: Clone> TtlCache<V> {
    /// Creates an empty cache whose entries expire `ttl_seconds` after insertion.
    pub fn new(ttl_seconds: u64) -> Self {
        Self {
            store: Mutex::new(CacheStore::new(ttl_seconds)),
        }
    }

    /// Configured TTL in seconds.
    pub fn ttl_seconds(&self) -> u64 {
        self.store.lock().ttl_seconds()
    }

    // == Get ==
    /// Returns the live entry for `key`, purging expired entries first.
    pub fn get(&self, key: &str) -> Option<CacheEntry<V>> {
        self.store.lock().get_at(key, Utc::now())
    }

    // == Set ==
    /// Stores `value` under `key`, replacing any existing entry.
    pub fn set(&self, key: &str, value: V) -> CacheEntry<V> {
        self.store.lock().set_at(key, value, Utc::now())
    }

    // == Get Or Compute ==
    /// Returns the live entry for `key`, or computes, stores and returns a new one.
    ///
    /// `compute` is never called while a live entry exists, and is called at
    /// most once per invocation. It runs outside the lock so a slow render does
    /// not block other keys. If another caller stored a live entry for the same
    /// key while `compute` was running, that entry is kept and returned as a
    /// hit. Errors from `compute` are returned unchanged and nothing is stored.
    pub fn get_or_compute<F, E>(&self, key: &str, compute: F) -> Result<CacheLookup<V>, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(entry) = self.get(key) {
            trace!(key, "cache hit");
            return Ok(Self::hit(entry));
        }

        debug!(key, "cache miss, computing value");
        let value = compute()?;

        let mut store = self.store.lock();
        let now = Utc::now();
        if let Some(entry) = store.get_at(key, now) {
            debug!(key, "entry stored concurrently, discarding computed value");
            return Ok(Self::hit(entry));
        }

        let entry = store.set_at(key, value.clone(), now);
        Ok(CacheLookup {
            value,
            entry,
            was_cache_hit: false,
        })
    }

    // == Stats ==
    /// Live entry count after purging, with the configured TTL.
    pub fn stats(&self) -> CacheStats {
        self.store.lock().stats_at(Utc::now())
    }

    // == Purge Expired ==
    /// Removes all expired entries and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        self.store.lock().purge_expired_at(Utc::now())
    }

    fn hit(entry: CacheEntry<V>) -> CacheLookup<V> {
        CacheLookup {
            value: entry.value.clone(),
            entry,
            was_cache_hit: true,
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Barrier};
    use std::thread::{self, sleep};
    use std::time::Duration;

    #[test]
    fn test_get_never_set_is_absent() {
        let cache: TtlCache<String> = TtlCache::new(60);
        assert!(cache.get("missing").is_none());
    }

    #[test]
    fn test_set_then_get() {
        let cache = TtlCache::new(60);
        let before = Utc::now();

        let stored = cache.set("key", "value".to_string());
        let entry = cache.get("key").unwrap();

        assert_eq!(entry.value, "value");
        assert_eq!(entry, stored);
        let drift = entry.expires_at - (before + chrono::Duration::seconds(60));
        assert!(drift >= chrono::Duration::zero());
        assert!(drift < chrono::Duration::seconds(1));
    }

    #[test]
    fn test_get_after_ttl_is_absent() {
        let cache = TtlCache::new(1);
        cache.set("key", 1u32);

        sleep(Duration::from_millis(1100));

        assert!(cache.get("key").is_none());
        assert_eq!(cache.stats().item_count, 0);
    }

    #[test]
    fn test_get_or_compute_hit_skips_compute() {
        let cache = TtlCache::new(60);
        cache.set("key", 7u32);

        let lookup = cache
            .get_or_compute("key", || -> Result<u32, String> {
                panic!("compute must not run on a hit")
            })
            .unwrap();

        assert!(lookup.was_cache_hit);
        assert_eq!(lookup.value, 7);
    }

    #[test]
    fn test_get_or_compute_miss_then_hit() {
        let cache = TtlCache::new(60);
        let calls = AtomicUsize::new(0);
        let compute = || -> Result<Vec<u8>, String> {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![1, 2, 3])
        };

        let first = cache.get_or_compute("key", compute).unwrap();
        let second = cache.get_or_compute("key", compute).unwrap();

        assert!(!first.was_cache_hit);
        assert!(second.was_cache_hit);
        assert_eq!(first.value, second.value);
        assert_eq!(first.entry.expires_at, second.entry.expires_at);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_get_or_compute_recomputes_after_expiry() {
        let cache = TtlCache::new(1);
        let calls = AtomicUsize::new(0);
        let compute = || -> Result<u32, String> { Ok(calls.fetch_add(1, Ordering::SeqCst) as u32) };

        let first = cache.get_or_compute("key", compute).unwrap();
        sleep(Duration::from_millis(1100));
        let second = cache.get_or_compute("key", compute).unwrap();

        assert!(!first.was_cache_hit);
        assert!(!second.was_cache_hit);
        assert_eq!(second.value, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_get_or_compute_error_is_not_cached() {
        let cache: TtlCache<u32> = TtlCache::new(60);

        let result = cache.get_or_compute("key", || Err("render failed".to_string()));
        assert_eq!(result.unwrap_err(), "render failed");
        assert!(cache.get("key").is_none());
        assert_eq!(cache.stats().item_count, 0);

        let retry = cache
            .get_or_compute("key", || Ok::<_, String>(5))
            .unwrap();
        assert!(!retry.was_cache_hit);
        assert_eq!(retry.value, 5);
    }

    #[test]
    fn test_stats_counts_only_live_entries() {
        let cache = TtlCache::new(1);
        cache.set("first", 1u8);

        sleep(Duration::from_millis(600));
        cache.set("second", 2u8);
        cache.set("third", 3u8);

        sleep(Duration::from_millis(500));
        let stats = cache.stats();

        assert_eq!(stats.item_count, 2);
        assert_eq!(stats.ttl_seconds, 1);
    }

    #[test]
    fn test_purge_expired_reports_removed() {
        let cache = TtlCache::new(1);
        cache.set("a", 1u8);
        cache.set("b", 2u8);

        sleep(Duration::from_millis(1100));

        assert_eq!(cache.purge_expired(), 2);
        assert_eq!(cache.purge_expired(), 0);
    }

    #[test]
    fn test_concurrent_get_or_compute_converges_on_one_value() {
        let cache = Arc::new(TtlCache::new(60));
        let barrier = Arc::new(Barrier::new(8));

        let handles: Vec<_> = (0..8u32)
            .map(|i| {
                let cache = Arc::clone(&cache);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    cache
                        .get_or_compute("shared", || Ok::<_, String>(i))
                        .unwrap()
                })
            })
            .collect();

        let lookups: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let stored = cache.get("shared").unwrap().value;

        let misses = lookups.iter().filter(|l| !l.was_cache_hit).count();
        assert_eq!(misses, 1);
        for lookup in &lookups {
            assert_eq!(lookup.value, stored);
        }
        assert_eq!(cache.stats().item_count, 1);
    }
}
