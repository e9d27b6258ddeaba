//! Cache Entry Module
//!
//! Defines the immutable record stored for each cached key.

use chrono::{DateTime, Duration, Utc};

// == Cache Entry ==
/// A stored value together with its creation and expiration instants.
///
/// Entries are never mutated after construction. Overwriting a key replaces
/// the whole entry.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// When the entry was stored
    pub created_at: DateTime<Utc>,
    /// `created_at + ttl`
    pub expires_at: DateTime<Utc>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates an entry stamped at `created_at` that lives for `ttl`.
    pub fn new(value: V, created_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            value,
            created_at,
            expires_at: created_at + ttl,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired as of `now`.
    ///
    /// Boundary condition: the entry is expired once `now` reaches
    /// `expires_at`, so a zero TTL produces an entry that is never served.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
