//! Response DTOs for the countdown API
//!
//! Defines the structure of outgoing HTTP response bodies.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for the root endpoint (GET /)
#[derive(Debug, Clone, Serialize)]
pub struct RootResponse {
    pub message: String,
}

impl RootResponse {
    pub fn running(app_name: &str) -> Self {
        Self {
            message: format!("{} is running", app_name),
        }
    }
}

/// Response body for the embed endpoint (POST /countdown/embed)
#[derive(Debug, Clone, Serialize)]
pub struct EmbedResponse {
    /// When the cached asset expires
    pub expires_at: DateTime<Utc>,
    /// Whether the asset came from the cache
    pub cached: bool,
    /// `data:image/...;base64,...` URI of the asset
    pub asset_data_uri: String,
    /// HTML snippet embedding the asset
    pub embed_html: String,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status, always "ok"
    pub status: String,
    /// Number of live entries in the TTL cache
    pub cache_items: usize,
    /// Configured cache TTL in seconds
    pub cache_ttl_seconds: u64,
}

impl HealthResponse {
    /// Creates a healthy response from a cache snapshot
    pub fn ok(stats: CacheStats) -> Self {
        Self {
            status: "ok".to_string(),
            cache_items: stats.item_count,
            cache_ttl_seconds: stats.ttl_seconds,
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
