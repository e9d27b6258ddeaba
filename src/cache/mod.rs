//! Cache Module
//!
//! Provides an in-memory cache with fixed-TTL expiration and atomic
//! get-or-compute.

mod entry;
mod stats;
mod store;
mod ttl_cache;


// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::CacheStore;
pub use ttl_cache::{CacheLookup, TtlCache};

// == Public Constants ==
/// Upper bound on the configured TTL (100 years)
pub const MAX_TTL_SECONDS: u64 = 100 * 365 * 24 * 60 * 60;
