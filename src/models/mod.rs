use axum::body::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::hash::sha512_hex;

/// An image received by `POST /label`, owned by a single request
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: String,
    pub data: Bytes,
}

impl UploadedImage {
    pub fn new<S: Into<String>, B: Into<Bytes>>(file_name: S, data: B) -> Self {
        Self {
            file_name: file_name.into(),
            data: data.into(),
        }
    }
}

/// Lowercase hex SHA-512 digest of an image's raw bytes
///
/// Used as the cache key for deduplication, not for integrity or security.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentHash(String);

impl ContentHash {
    pub fn from_bytes(data: &[u8]) -> Self {
        Self(sha512_hex(data))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A descriptive tag with the detection service's confidence score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub label: String,
    pub score: f64,
}

impl Label {
    pub fn new<S: Into<String>>(label: S, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Labels previously computed for a content hash
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub key: ContentHash,
    pub labels: Vec<Label>,
    pub created: DateTime<Utc>,
}

/// Where the labels in a response came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelSource {
    Cache,
    Api,
}

/// Diagnostic metadata attached to every label response
///
/// `api_query_time_ms` and `cache_save_time_ms` are only present when the
/// labels were fetched from the detection service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub source: LabelSource,
    pub cache_query_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_query_time_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_save_time_ms: Option<u64>,
}

/// Response body for `POST /label`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelResponse {
    pub trace: Trace,
    pub result: Vec<Label>,
}

impl LabelResponse {
    pub fn from_cache(labels: Vec<Label>, cache_query_time_ms: u64) -> Self {
        Self {
            trace: Trace {
                source: LabelSource::Cache,
                cache_query_time_ms,
                api_query_time_ms: None,
                cache_save_time_ms: None,
            },
            result: labels,
        }
    }

    pub fn from_api(
        labels: Vec<Label>,
        cache_query_time_ms: u64,
        api_query_time_ms: u64,
        cache_save_time_ms: u64,
    ) -> Self {
        Self {
            trace: Trace {
                source: LabelSource::Api,
                cache_query_time_ms,
                api_query_time_ms: Some(api_query_time_ms),
                cache_save_time_ms: Some(cache_save_time_ms),
            },
            result: labels,
        }
    }
}
