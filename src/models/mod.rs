//! Request and Response models for the countdown API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{CountdownRequest, DEFAULT_ALT_TEXT, MAX_ALT_TEXT_LENGTH};
pub use responses::{EmbedResponse, ErrorResponse, HealthResponse, RootResponse};
