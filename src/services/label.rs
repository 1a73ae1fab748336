//! Cache-then-compute labelling flow
//!
//! Each request runs through the same steps:
//!
//! 1. **Validate** the upload's file extension
//! 2. **Hash** the raw bytes
//! 3. **Look up** the hash in the cache store; a hit is answered directly
//! 4. **Annotate** the base64-encoded bytes with the detection service
//! 5. **Store** the labels under the hash
//!
//! Every step after validation is timed and reported in the response trace.
//! No step is retried and no failure falls back to another path.

use std::sync::Arc;
use tracing::{debug, info};

use crate::annotation::LabelAnnotator;
use crate::cache::CacheStore;
use crate::errors::{AppError, AppResult};
use crate::models::{ContentHash, LabelResponse, UploadedImage};
use crate::utils::{encoding::encode_base64, files::is_allowed_file, time::timed};

/// Request orchestrator for `POST /label`
#[derive(Clone)]
pub struct LabelService {
    cache: Arc<dyn CacheStore>,
    annotator: Arc<dyn LabelAnnotator>,
}

impl LabelService {
    pub fn new(cache: Arc<dyn CacheStore>, annotator: Arc<dyn LabelAnnotator>) -> Self {
        Self { cache, annotator }
    }

    pub fn cache_backend(&self) -> &'static str {
        self.cache.backend()
    }

    /// Label an uploaded image, answering from the cache when possible
    pub async fn label(&self, upload: UploadedImage) -> AppResult<LabelResponse> {
        Self::validate(&upload)?;

        let hash = ContentHash::from_bytes(&upload.data);
        debug!(
            "Labelling {} ({} bytes, hash {})",
            upload.file_name,
            upload.data.len(),
            hash
        );

        let lookup = timed(self.cache.get(&hash)).await;
        let cache_query_time_ms = lookup.elapsed_ms();
        if let Some(entry) = lookup.value? {
            info!(
                "Cache hit for {} ({} labels, lookup {}ms)",
                upload.file_name,
                entry.labels.len(),
                cache_query_time_ms
            );
            return Ok(LabelResponse::from_cache(entry.labels, cache_query_time_ms));
        }

        let encoded = encode_base64(&upload.data);
        let annotation = timed(self.annotator.annotate(&encoded)).await;
        let api_query_time_ms = annotation.elapsed_ms();
        let labels = annotation.value?;

        let save = timed(self.cache.put(&hash, &labels)).await;
        let cache_save_time_ms = save.elapsed_ms();
        save.value?;

        info!(
            "Cache miss for {} ({} labels, lookup {}ms, api {}ms, save {}ms)",
            upload.file_name,
            labels.len(),
            cache_query_time_ms,
            api_query_time_ms,
            cache_save_time_ms
        );

        Ok(LabelResponse::from_api(
            labels,
            cache_query_time_ms,
            api_query_time_ms,
            cache_save_time_ms,
        ))
    }

    fn validate(upload: &UploadedImage) -> AppResult<()> {
        if !is_allowed_file(&upload.file_name) {
            return Err(AppError::validation(format!(
                "File '{}' is not an allowed image type (png, jpg, jpeg)",
                upload.file_name
            )));
        }
        Ok(())
    }
}
