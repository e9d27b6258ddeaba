//! API Handlers
//!
//! HTTP request handlers for each countdown service endpoint.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use tracing::debug;

use crate::cache::{CacheLookup, TtlCache};
use crate::config::Config;
use crate::countdown::{
    data_uri, render_countdown, render_embed_snippet, NormalizedRequest, Normalizer,
};
use crate::error::{AppError, Result};
use crate::models::{CountdownRequest, EmbedResponse, HealthResponse, RootResponse};

/// Application state shared across all handlers.
///
/// The cache is internally synchronized, so handlers share it through an
/// `Arc` without an outer lock.
#[derive(Clone)]
pub struct AppState {
    /// Rendered assets keyed by normalized request
    pub cache: Arc<TtlCache<Bytes>>,
    pub normalizer: Normalizer,
    pub app_name: Arc<str>,
}

impl AppState {
    /// Creates a new AppState from its parts.
    pub fn new(cache: TtlCache<Bytes>, normalizer: Normalizer, app_name: &str) -> Self {
        Self {
            cache: Arc::new(cache),
            normalizer,
            app_name: Arc::from(app_name),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Fails if the configured default timezone is unknown.
    pub fn from_config(config: &Config) -> Result<Self> {
        let normalizer = Normalizer::new(&config.default_timezone)?;
        let cache = TtlCache::new(config.cache_ttl_seconds);
        Ok(Self::new(cache, normalizer, &config.app_name))
    }
}

/// Validates and normalizes `request`, then serves the asset from the cache,
/// rendering it on a blocking thread on a miss.
async fn lookup_countdown(
    state: &AppState,
    request: &CountdownRequest,
) -> Result<(NormalizedRequest, CacheLookup<Bytes>)> {
    if let Some(error_msg) = request.validate() {
        return Err(AppError::InvalidRequest(error_msg));
    }

    let normalized = state.normalizer.normalize(request)?;

    let cache = Arc::clone(&state.cache);
    let key = normalized.cache_key.clone();
    let (remaining, style, format) = (normalized.remaining, normalized.style, normalized.format);
    let lookup = tokio::task::spawn_blocking(move || {
        cache.get_or_compute(&key, || render_countdown(remaining, style, format).map(Bytes::from))
    })
    .await
    .map_err(|e| AppError::Internal(format!("render task failed: {e}")))??;

    debug!(
        cache_key = %normalized.cache_key,
        cached = lookup.was_cache_hit,
        "Countdown asset served"
    );
    Ok((normalized, lookup))
}

fn asset_response(normalized: &NormalizedRequest, lookup: CacheLookup<Bytes>) -> Response {
    let cache_status = if lookup.was_cache_hit { "HIT" } else { "MISS" };
    let headers = [
        ("content-type", normalized.format.mime_type().to_string()),
        ("x-cache", cache_status.to_string()),
        ("x-expires-at", lookup.entry.expires_at.to_rfc3339()),
    ];
    (headers, lookup.value).into_response()
}

/// Handler for GET /
pub async fn root_handler(State(state): State<AppState>) -> Json<RootResponse> {
    Json(RootResponse::running(&state.app_name))
}

/// Handler for GET /health
///
/// Reports live cache entries and the configured TTL.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::ok(state.cache.stats()))
}

/// Handler for POST /countdown/asset
///
/// Returns the raw image with `X-Cache` and `X-Expires-At` headers.
pub async fn asset_handler(
    State(state): State<AppState>,
    Json(req): Json<CountdownRequest>,
) -> Result<Response> {
    let (normalized, lookup) = lookup_countdown(&state, &req).await?;
    Ok(asset_response(&normalized, lookup))
}

/// Handler for GET /countdown/asset
///
/// Same as the POST form with fields taken from the query string, so the
/// URL can be used directly as an `<img src>`.
pub async fn asset_query_handler(
    State(state): State<AppState>,
    Query(req): Query<CountdownRequest>,
) -> Result<Response> {
    let (normalized, lookup) = lookup_countdown(&state, &req).await?;
    Ok(asset_response(&normalized, lookup))
}

/// Handler for POST /countdown/embed
///
/// Returns the asset as a data URI plus an HTML snippet embedding it.
pub async fn embed_handler(
    State(state): State<AppState>,
    Json(req): Json<CountdownRequest>,
) -> Result<Json<EmbedResponse>> {
    let (normalized, lookup) = lookup_countdown(&state, &req).await?;

    let asset_data_uri = data_uri(&lookup.value, normalized.format);
    let embed_html = render_embed_snippet(
        &asset_data_uri,
        req.alt_text(),
        req.click_through_url.as_ref().map(|url| url.as_str()),
    );

    Ok(Json(EmbedResponse {
        expires_at: lookup.entry.expires_at,
        cached: lookup.was_cache_hit,
        asset_data_uri,
        embed_html,
    }))
}
