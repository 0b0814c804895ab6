//! Google Gemini backend (`generateContent` REST API).
//!
//! The request asks for `application/json` output. An attached image is
//! sent base64-encoded as a second `inline_data` part after the text.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use crate::error::AssessError;
use crate::model::{AssessmentModel, ModelRequest};

pub const DEFAULT_MODEL_ID: &str = "gemini-3-flash-preview";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Longest slice of an error body kept in [`AssessError::Status`].
const MAX_ERROR_BODY: usize = 512;

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model_id: String,
    base_url: String,
}

impl GeminiClient {
    /// Build a client. `timeout` of `None` leaves requests unbounded.
    pub fn new(
        api_key: impl Into<String>,
        model_id: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, AssessError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(AssessError::Config("Gemini API key is empty".to_string()));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| AssessError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_key,
            model_id: model_id.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Point the client at a different endpoint root (proxies, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model_id)
    }
}

#[async_trait]
impl AssessmentModel for GeminiClient {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn generate(&self, request: &ModelRequest) -> Result<String, AssessError> {
        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body(request))
            .send()
            .await
            .map_err(|e| AssessError::Invocation(e.to_string()))?;

        let status = response.status();
        let raw = response
            .text()
            .await
            .map_err(|e| AssessError::Invocation(e.to_string()))?;

        if !status.is_success() {
            return Err(AssessError::Status {
                status: status.as_u16(),
                body: truncate(&raw, MAX_ERROR_BODY),
            });
        }

        let envelope: GenerateContentResponse = serde_json::from_str(&raw)
            .map_err(|e| AssessError::ResponseParse(format!("unexpected Gemini envelope: {e}")))?;
        let text = envelope.text();

        info!(
            model_id = %self.model_id,
            text_len = text.len(),
            "gemini generation complete"
        );

        Ok(text)
    }
}

/// JSON body for a `generateContent` call.
pub fn request_body(request: &ModelRequest) -> Value {
    let mut parts = vec![json!({ "text": request.prompt })];
    if let Some(image) = &request.image {
        parts.push(json!({
            "inline_data": {
                "mime_type": image.media_type,
                "data": STANDARD.encode(&image.bytes),
            }
        }));
    }

    json!({
        "contents": [{ "role": "user", "parts": parts }],
        "generationConfig": { "responseMimeType": "application/json" },
    })
}

/// The subset of the `generateContent` response we read.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate; empty if the model
    /// returned no candidate (e.g. the prompt was blocked).
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}
