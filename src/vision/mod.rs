//! Hosted vision-language model access.
//!
//! A `VisionConnector` turns a credential into a ready `VisionModel`; the
//! model transcribes one page image per call.

mod gemini;

use std::path::Path;

use base64::Engine;
use thiserror::Error;

pub use gemini::{GeminiConnector, DEFAULT_API_BASE, DEFAULT_MODEL};

/// Fixed transcription prompt sent with every page.
pub const TRANSCRIBE_PROMPT: &str = "Please perform OCR on this image. Transcribe all visible text verbatim (Bangla, English, or mixed), preserving line and paragraph structure as it appears. Output only the transcription, with no commentary or explanation.";

/// Errors from the vision model.
#[derive(Debug, Error)]
pub enum VisionError {
    #[error("Model initialization failed: {0}")]
    Init(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Vision API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unparseable model response")]
    Unparseable,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shape of a model reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisionResponse {
    /// A single text body.
    Text(String),
    /// Several text parts to be concatenated.
    Parts(Vec<String>),
    /// Nothing textual could be recovered.
    Unparseable,
}

impl VisionResponse {
    /// Text of the reply, or `None` when it could not be parsed.
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text),
            Self::Parts(parts) => Some(parts.concat()),
            Self::Unparseable => None,
        }
    }
}

/// A connected vision model.
pub trait VisionModel: Send + Sync {
    /// Send the prompt and one base64-encoded image in a single request.
    fn transcribe(
        &self,
        prompt: &str,
        image_base64: &str,
        mime_type: &str,
    ) -> Result<VisionResponse, VisionError>;
}

/// Builds a `VisionModel` for a credential.
pub trait VisionConnector: Send + Sync {
    fn connect(&self, api_key: &str) -> Result<Box<dyn VisionModel>, VisionError>;
}

/// Read an image file and encode it as base64, returning (base64_data, mime_type).
pub fn encode_image_base64(image_path: &Path) -> Result<(String, &'static str), VisionError> {
    let image_bytes = std::fs::read(image_path)?;
    let base64_data = base64::engine::general_purpose::STANDARD.encode(&image_bytes);

    let mime_type = if image_path.extension().is_some_and(|e| e == "png") {
        "image/png"
    } else {
        "image/jpeg"
    };

    Ok((base64_data, mime_type))
}
