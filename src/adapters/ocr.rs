use crate::domain::ports::OcrProvider;
use crate::utils::error::{Result, RxError};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Text-detection client for a Vision-style `images:annotate` endpoint.
/// Sends the image inline as base64 and takes the first text annotation.
pub struct HttpOcrClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl HttpOcrClient {
    pub fn new(endpoint: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            api_key,
        }
    }
}

#[derive(Serialize)]
struct AnnotateRequest {
    requests: Vec<AnnotateEntry>,
}

#[derive(Serialize)]
struct AnnotateEntry {
    image: InlineImage,
    features: Vec<Feature>,
}

#[derive(Serialize)]
struct InlineImage {
    content: String,
}

#[derive(Serialize)]
struct Feature {
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<AnnotationResult>,
}

#[derive(Deserialize, Default)]
struct AnnotationResult {
    #[serde(default, rename = "textAnnotations")]
    text_annotations: Vec<TextAnnotation>,
    error: Option<ApiStatus>,
}

#[derive(Deserialize)]
struct TextAnnotation {
    description: String,
}

#[derive(Deserialize)]
struct ApiStatus {
    #[serde(default)]
    message: String,
}

#[async_trait]
impl OcrProvider for HttpOcrClient {
    async fn detect_text(&self, png: &[u8]) -> Result<Option<String>> {
        let body = AnnotateRequest {
            requests: vec![AnnotateEntry {
                image: InlineImage {
                    content: BASE64_STANDARD.encode(png),
                },
                features: vec![Feature {
                    kind: "TEXT_DETECTION".to_string(),
                }],
            }],
        };

        tracing::debug!("Sending {} image bytes to OCR endpoint", png.len());
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("OCR response status: {}", status);
        if !status.is_success() {
            return Err(RxError::service(
                "ocr",
                format!("HTTP {} from text detection endpoint", status),
            ));
        }

        let parsed: AnnotateResponse = response.json().await?;
        let result = parsed.responses.into_iter().next().unwrap_or_default();

        if let Some(err) = result.error {
            return Err(RxError::service("ocr", err.message));
        }

        // The first annotation covers the whole detected block; the rest are
        // per-word and ignored, as in the original flow.
        match result.text_annotations.into_iter().next() {
            Some(annotation) if !annotation.description.trim().is_empty() => {
                Ok(Some(annotation.description))
            }
            _ => Ok(None),
        }
    }
}
