//! Cache Statistics Module
//!
//! Point-in-time snapshot exposed through the health endpoint.

use serde::Serialize;

// == Cache Stats ==
/// Derived snapshot of the cache; never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of live entries after purging expired ones
    pub item_count: usize,
    /// Configured time-to-live in seconds
    pub ttl_seconds: u64,
}

impl CacheStats {
    // == Constructor ==
    pub fn new(item_count: usize, ttl_seconds: u64) -> Self {
        Self {
            item_count,
            ttl_seconds,
        }
    }
}
