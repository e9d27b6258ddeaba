//! Countdown Service - countdown images and embed snippets over HTTP
//!
//! Renders the time left until a target date as a PNG/GIF or an HTML embed
//! snippet, caching identical requests in an in-memory TTL cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod countdown;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_sweeper_task;
