//! Centralized error handling for the image annotator
//!
//! # Error Categories
//!
//! - **Validation Errors**: missing upload or disallowed file extension
//! - **Upstream Errors**: label detection service failures
//! - **Store Errors**: cache read/write failures
//! - **Web Errors**: malformed or oversized multipart requests
//!
//! # Usage
//!
//! ```rust
//! use image_annotator::errors::{AppError, AppResult};
//!
//! fn example_function() -> AppResult<String> {
//!     Err(AppError::validation("No file uploaded"))
//! }
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for label detection service Results
pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// Convenience type alias for cache store Results
pub type StoreResult<T> = Result<T, StoreError>;
