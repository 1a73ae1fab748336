//! Utility functions for the image annotator
//!
//! - `hash` for content addressing of uploads
//! - `encoding` for the base64 payload sent to the label detection service
//! - `time` for per-step timing reported in response traces
//! - `files` for the upload file-extension allow-list

pub mod encoding;
pub mod files;
pub mod hash;
pub mod time;
