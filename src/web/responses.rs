//! HTTP response types and utilities
//!
//! Successful label responses are serialized directly; every failure uses the
//! same error envelope so clients can tell validation, upstream and store
//! failures apart by status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::errors::{AppError, WebError};

/// Error envelope returned by every failing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always `false`
    pub success: bool,
    pub error: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl ErrorResponse {
    pub fn new(message: String) -> Self {
        Self {
            success: false,
            error: message,
            timestamp: chrono::Utc::now(),
        }
    }
}

/// Convert AppError to appropriate HTTP response
pub fn handle_error(error: AppError) -> Response {
    let (status, message) = match &error {
        AppError::Validation { message } => (StatusCode::BAD_REQUEST, message.clone()),
        AppError::Web(WebError::InvalidRequest { field, message }) => (
            StatusCode::BAD_REQUEST,
            format!("Invalid request field '{}': {}", field, message),
        ),
        AppError::Web(WebError::PayloadTooLarge { max_size }) => (
            StatusCode::PAYLOAD_TOO_LARGE,
            format!("Upload exceeds the {} byte limit", max_size),
        ),
        AppError::Upstream(e) => {
            warn!("Label detection failed: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                format!("Label detection service failed: {}", e),
            )
        }
        AppError::Store(e) => {
            error!("Cache store failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Cache store operation failed".to_string(),
            )
        }
        AppError::Configuration { message } => {
            error!("Configuration error: {}", message);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Configuration error: {}", message),
            )
        }
    };

    (status, Json(ErrorResponse::new(message))).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        handle_error(self)
    }
}
