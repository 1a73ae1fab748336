//! Error type definitions for the image annotator
//!
//! This module defines all error types used throughout the application,
//! keeping failures of the two external collaborators (the label detection
//! service and the cache store) distinguishable from each other and from
//! request validation failures.

use thiserror::Error;

/// Top-level application error type
///
/// Every failure is terminal for the request it occurred in. The web layer
/// maps each variant onto an HTTP status code.
#[derive(Error, Debug)]
pub enum AppError {
    /// The upload was rejected before any external call was made
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Label detection service errors
    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    /// Cache store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Web layer errors
    #[error("Web error: {0}")]
    Web(#[from] WebError),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Failures of the external label detection service
///
/// None of these are retried.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Transport failures, including timeouts
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success HTTP status from the service
    #[error("HTTP error: {status} - {message}")]
    Status { status: u16, message: String },

    /// The service answered but reported an error for the image
    #[error("Service error: {code} - {message}")]
    Service { code: i32, message: String },

    /// The response did not have the expected structure
    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },
}

/// Failures of the cache store
///
/// A store failure is never reported as a cache miss.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database errors from sqlx
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Label serialization/deserialization failures
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored entry exists but cannot be decoded
    #[error("Corrupt cache entry {key}: {message}")]
    CorruptEntry { key: String, message: String },
}

/// Web layer specific errors
#[derive(Error, Debug)]
pub enum WebError {
    /// Invalid request format
    #[error("Invalid request: {field} - {message}")]
    InvalidRequest { field: String, message: String },

    /// Request payload too large
    #[error("Payload too large (max: {max_size} bytes)")]
    PayloadTooLarge { max_size: usize },
}

/// Convenience methods for creating common error types
impl AppError {
    /// Create a validation error with a custom message
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

impl UpstreamError {
    /// Create a malformed response error
    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }
}

impl WebError {
    /// Create an invalid request error
    pub fn invalid_request<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        Self::InvalidRequest {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl StoreError {
    pub fn corrupt_entry<K: Into<String>, M: Into<String>>(key: K, message: M) -> Self {
        Self::CorruptEntry {
            key: key.into(),
            message: message.into(),
        }
    }
}
