//! Vision OCR gateway
//!
//! Thin HTTP client for a Google-Vision-shaped `images:annotate` endpoint.
//! The service is an external collaborator: image bytes in, recognized text
//! out. Input validation (empty or oversized uploads) is the caller's job
//! before the gateway is reached.

use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Default endpoint for the hosted vision API
const DEFAULT_ENDPOINT: &str = "https://vision.googleapis.com";

#[derive(Clone)]
pub struct VisionClient {
    http_client: Client,
    endpoint: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct AnnotateRequest {
    requests: Vec<AnnotateEntry>,
}

#[derive(Debug, Serialize)]
struct AnnotateEntry {
    image: ImageContent,
    features: Vec<Feature>,
}

#[derive(Debug, Serialize)]
struct ImageContent {
    content: String,
}

#[derive(Debug, Serialize)]
struct Feature {
    #[serde(rename = "type")]
    feature_type: String,
}

#[derive(Debug, Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<AnnotateResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateResult {
    #[serde(default)]
    full_text_annotation: Option<FullTextAnnotation>,
    #[serde(default)]
    text_annotations: Vec<TextAnnotation>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct FullTextAnnotation {
    text: String,
}

#[derive(Debug, Deserialize)]
struct TextAnnotation {
    description: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

impl VisionClient {
    pub fn new(endpoint: &str, api_key: &str) -> Self {
        Self {
            http_client: Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Create from environment variables
    ///
    /// Requires `VISION_API_KEY`; `VISION_ENDPOINT` overrides the hosted
    /// default. Returns `None` when the key is not set, in which case OCR
    /// requests surface [`Error::VisionUnavailable`].
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("VISION_API_KEY").ok()?;
        let endpoint =
            std::env::var("VISION_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        Some(Self::new(&endpoint, &api_key))
    }

    /// Run document OCR over raw image bytes, returning the recognized text
    ///
    /// Prefers the full-text annotation; falls back to the first
    /// text-annotation fragment when the full-text field is not populated.
    pub async fn run_ocr(&self, image: &[u8]) -> Result<String> {
        let request = AnnotateRequest {
            requests: vec![AnnotateEntry {
                image: ImageContent {
                    content: base64::engine::general_purpose::STANDARD.encode(image),
                },
                features: vec![Feature {
                    feature_type: "DOCUMENT_TEXT_DETECTION".to_string(),
                }],
            }],
        };

        let response = self
            .http_client
            .post(format!(
                "{}/v1/images:annotate?key={}",
                self.endpoint, self.api_key
            ))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Http(response.error_for_status().unwrap_err()));
        }

        let annotate: AnnotateResponse = response.json().await?;
        let result = annotate
            .responses
            .into_iter()
            .next()
            .ok_or_else(|| Error::VisionService("empty annotate response".to_string()))?;

        if let Some(err) = result.error {
            return Err(Error::VisionService(err.message));
        }

        if let Some(full) = result.full_text_annotation {
            debug!(chars = full.text.len(), "Vision OCR full text");
            return Ok(full.text);
        }

        result
            .text_annotations
            .into_iter()
            .next()
            .map(|a| a.description)
            .ok_or_else(|| Error::VisionService("no text recognized".to_string()))
    }

    pub fn host(&self) -> &str {
        &self.endpoint
    }
}
