//! Google Gemini `generateContent` client.
//!
//! Blocking on purpose: extraction pipelines are synchronous and the HTTP
//! boundary already runs them on blocking threads.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{VisionConnector, VisionError, VisionModel, VisionResponse};

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp";

/// The key travels in a header so it never shows up in request URLs or errors.
const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum GeminiPart<'a> {
    Text { text: &'a str },
    InlineData { inline_data: GeminiInlineData<'a> },
}

#[derive(Debug, Serialize)]
struct GeminiInlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
    error: Option<GeminiError>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiResponseContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

/// Classify a decoded reply: one text part is `Text`, several are `Parts`,
/// none is `Unparseable`.
fn classify_response(response: GeminiResponse) -> Result<VisionResponse, VisionError> {
    if let Some(error) = response.error {
        return Err(VisionError::Api {
            status: 200,
            message: error.message,
        });
    }

    let mut texts: Vec<String> = response
        .candidates
        .and_then(|c| c.into_iter().next())
        .and_then(|c| c.content)
        .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    Ok(match texts.len() {
        0 => VisionResponse::Unparseable,
        1 => VisionResponse::Text(texts.remove(0)),
        _ => VisionResponse::Parts(texts),
    })
}

/// Connects to Gemini by fetching the model's metadata with the caller's key.
#[derive(Debug, Clone)]
pub struct GeminiConnector {
    api_base: String,
    model: String,
    timeout: Duration,
}

impl GeminiConnector {
    pub fn new(api_base: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Self {
        Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            model: model.into(),
            timeout,
        }
    }
}

impl Default for GeminiConnector {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE, DEFAULT_MODEL, Duration::from_secs(120))
    }
}

impl VisionConnector for GeminiConnector {
    fn connect(&self, api_key: &str) -> Result<Box<dyn VisionModel>, VisionError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| VisionError::Init(format!("Failed to create HTTP client: {}", e)))?;

        let url = format!("{}/models/{}", self.api_base, self.model);
        debug!("Fetching model metadata from {}", url);
        let response = client
            .get(&url)
            .header(API_KEY_HEADER, api_key)
            .send()
            .map_err(|e| VisionError::Init(format!("{}: {}", self.model, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(VisionError::Init(format!(
                "{} ({}): {}",
                self.model, status, body
            )));
        }

        Ok(Box::new(GeminiClient {
            client,
            url: format!("{}/models/{}:generateContent", self.api_base, self.model),
            api_key: api_key.to_string(),
        }))
    }
}

/// A connected Gemini model.
struct GeminiClient {
    client: reqwest::blocking::Client,
    url: String,
    api_key: String,
}

impl VisionModel for GeminiClient {
    fn transcribe(
        &self,
        prompt: &str,
        image_base64: &str,
        mime_type: &str,
    ) -> Result<VisionResponse, VisionError> {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![
                    GeminiPart::Text { text: prompt },
                    GeminiPart::InlineData {
                        inline_data: GeminiInlineData {
                            mime_type,
                            data: image_base64,
                        },
                    },
                ],
            }],
        };

        let response = self
            .client
            .post(&self.url)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(&request)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(VisionError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text()?;
        match serde_json::from_str::<GeminiResponse>(&body) {
            Ok(parsed) => classify_response(parsed),
            Err(e) => {
                debug!("Failed to decode Gemini response: {}", e);
                Ok(VisionResponse::Unparseable)
            }
        }
    }
}
