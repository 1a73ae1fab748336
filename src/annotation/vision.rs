//! REST client for a Google Cloud Vision compatible `images:annotate` endpoint

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::LabelAnnotator;
use crate::config::VisionConfig;
use crate::errors::{UpstreamError, UpstreamResult};
use crate::models::Label;

const LABEL_DETECTION: &str = "LABEL_DETECTION";

#[derive(Debug, Serialize)]
struct AnnotateRequest<'a> {
    requests: Vec<AnnotateImageRequest<'a>>,
}

#[derive(Debug, Serialize)]
struct AnnotateImageRequest<'a> {
    image: Image<'a>,
    features: Vec<Feature>,
}

#[derive(Debug, Serialize)]
struct Image<'a> {
    content: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Feature {
    #[serde(rename = "type")]
    feature_type: &'static str,
    max_results: u32,
}

#[derive(Debug, Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<AnnotateImageResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateImageResponse {
    label_annotations: Option<Vec<EntityAnnotation>>,
    error: Option<Status>,
}

#[derive(Debug, Deserialize)]
struct EntityAnnotation {
    description: String,
    score: f64,
}

#[derive(Debug, Deserialize)]
struct Status {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    message: String,
}

/// Label detection over HTTP
///
/// Holds one pooled `reqwest::Client` for the life of the process.
#[derive(Clone)]
pub struct VisionClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    max_results: u32,
}

impl VisionClient {
    pub fn new(config: &VisionConfig) -> UpstreamResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            max_results: config.max_results,
        })
    }

    fn build_request<'a>(&self, image_base64: &'a str) -> AnnotateRequest<'a> {
        AnnotateRequest {
            requests: vec![AnnotateImageRequest {
                image: Image {
                    content: image_base64,
                },
                features: vec![Feature {
                    feature_type: LABEL_DETECTION,
                    max_results: self.max_results,
                }],
            }],
        }
    }

    fn extract_labels(&self, response: AnnotateResponse) -> UpstreamResult<Vec<Label>> {
        let image_response = response
            .responses
            .into_iter()
            .next()
            .ok_or_else(|| UpstreamError::malformed("response contains no image results"))?;

        if let Some(status) = image_response.error {
            return Err(UpstreamError::Service {
                code: status.code,
                message: status.message,
            });
        }

        let annotations = image_response
            .label_annotations
            .ok_or_else(|| UpstreamError::malformed("missing labelAnnotations"))?;

        Ok(annotations
            .into_iter()
            .take(self.max_results as usize)
            .map(|annotation| Label::new(annotation.description, annotation.score))
            .collect())
    }
}

#[async_trait]
impl LabelAnnotator for VisionClient {
    async fn annotate(&self, image_base64: &str) -> UpstreamResult<Vec<Label>> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&self.build_request(image_base64));
        if let Some(api_key) = &self.api_key {
            request = request.query(&[("key", api_key)]);
        }

        // The request URL carries the api key, so it is stripped from transport errors
        let response = request.send().await.map_err(redact)?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await.map_err(redact)?;
        let parsed: AnnotateResponse = serde_json::from_slice(&body)
            .map_err(|e| UpstreamError::malformed(format!("invalid JSON body: {e}")))?;

        let labels = self.extract_labels(parsed)?;
        debug!("Label detection returned {} labels", labels.len());
        Ok(labels)
    }
}

fn redact(error: reqwest::Error) -> UpstreamError {
    UpstreamError::Request(error.without_url())
}
