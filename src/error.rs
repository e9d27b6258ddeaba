//! Error types for the countdown service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{debug, error};

use crate::models::ErrorResponse;

// == App Error Enum ==
/// Unified error type for the countdown service.
#[derive(Error, Debug)]
pub enum AppError {
    /// Timezone identifier is not a known IANA zone
    #[error("Unknown timezone: {0}")]
    InvalidTimezone(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Image rendering or encoding failed
    #[error("Render failed: {0}")]
    Render(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// True for errors caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        matches!(self, AppError::InvalidTimezone(_) | AppError::InvalidRequest(_))
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvalidTimezone(_) | AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Render(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if self.is_client_error() {
            debug!("Rejected request: {}", self);
        } else {
            error!("Request failed: {}", self);
        }

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the countdown service.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_timezone_message() {
        let err = AppError::InvalidTimezone("Mars/Phobos".to_string());
        assert_eq!(err.to_string(), "Unknown timezone: Mars/Phobos");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_render_is_server_fault() {
        assert!(!AppError::Render("gif".to_string()).is_client_error());
        assert!(!AppError::Internal("join".to_string()).is_client_error());
    }
}
