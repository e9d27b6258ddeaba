//! API Module
//!
//! HTTP handlers and routing for the countdown service.
//!
//! # Endpoints
//! - `GET /` - Service banner
//! - `GET /health` - Cache introspection
//! - `POST|GET /countdown/asset` - Countdown image
//! - `POST /countdown/embed` - Countdown embed snippet

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
