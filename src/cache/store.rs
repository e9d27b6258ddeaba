//! Cache Store Module
//!
//! Unsynchronized storage engine: a HashMap of entries with a fixed TTL and
//! purge-on-access expiry. [`TtlCache`](crate::cache::TtlCache) wraps it in a
//! mutex for shared use.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::cache::{CacheEntry, CacheStats, MAX_TTL_SECONDS};

// == Cache Store ==
/// Key-value storage where every entry expires `ttl` after it was written.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// TTL applied to every entry
    ttl: Duration,
    ttl_seconds: u64,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates an empty store whose entries live for `ttl_seconds`.
    ///
    /// TTLs above [`MAX_TTL_SECONDS`] are clamped.
    pub fn new(ttl_seconds: u64) -> Self {
        let ttl_seconds = ttl_seconds.min(MAX_TTL_SECONDS);
        Self {
            entries: HashMap::new(),
            ttl: Duration::seconds(ttl_seconds as i64),
            ttl_seconds,
        }
    }

    /// Configured TTL in seconds.
    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    // == Purge Expired ==
    /// Removes every entry expired as of `now`.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired_at(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));
        before - self.entries.len()
    }

    // == Get ==
    /// Purges expired entries, then returns the live entry for `key`.
    pub fn get_at(&mut self, key: &str, now: DateTime<Utc>) -> Option<CacheEntry<V>> {
        self.purge_expired_at(now);
        self.entries.get(key).cloned()
    }

    // == Set ==
    /// Stores `value` under `key` with `expires_at = now + ttl`.
    ///
    /// Any existing entry for the key is replaced.
    pub fn set_at(&mut self, key: &str, value: V, now: DateTime<Utc>) -> CacheEntry<V> {
        let entry = CacheEntry::new(value, now, self.ttl);
        self.entries.insert(key.to_string(), entry.clone());
        entry
    }

    // == Stats ==
    /// Purges expired entries and reports the live count.
    pub fn stats_at(&mut self, now: DateTime<Utc>) -> CacheStats {
        self.purge_expired_at(now);
        CacheStats::new(self.entries.len(), self.ttl_seconds)
    }

    // == Length ==
    /// Number of stored entries, expired ones included until the next purge.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
