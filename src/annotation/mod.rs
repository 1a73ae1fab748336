//! Label detection collaborator
//!
//! The detection service is opaque to this crate: it receives base64-encoded
//! image bytes and answers with labels ranked by its own confidence ordering.

use async_trait::async_trait;

use crate::errors::UpstreamResult;
use crate::models::Label;

pub mod vision;

pub use vision::VisionClient;

#[async_trait]
pub trait LabelAnnotator: Send + Sync {
    /// Detect labels for a base64-encoded image
    ///
    /// Labels are returned in the order the service produced them. Failures
    /// are not retried.
    async fn annotate(&self, image_base64: &str) -> UpstreamResult<Vec<Label>>;
}
