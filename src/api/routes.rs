//! API Routes
//!
//! Configures the Axum router with all countdown service endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    asset_handler, asset_query_handler, embed_handler, health_handler, root_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /` - Service banner
/// - `GET /health` - Cache item count and TTL
/// - `POST /countdown/asset` - Render an image from a JSON body
/// - `GET /countdown/asset` - Render an image from query parameters
/// - `POST /countdown/embed` - Data URI plus HTML embed snippet
///
/// # Middleware
/// - CORS: Allows any origin so snippets can be embedded anywhere
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/countdown/asset", post(asset_handler).get(asset_query_handler))
        .route("/countdown/embed", post(embed_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
