//! OCR engine abstraction.
//!
//! The extractors only ever talk to `dyn OcrEngine`, so tests can swap the
//! Tesseract binary for an in-memory fake.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::ScriptCategory;

/// Errors from OCR engines.
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Engine not available: {0}")]
    EngineNotAvailable(String),

    #[error("OCR failed: {0}")]
    OcrFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Page segmentation mode for a single uniform block of text.
pub const PSM_SINGLE_BLOCK: u8 = 6;

/// Trait for OCR engines.
pub trait OcrEngine: Send + Sync {
    /// Engine name for logs and `lipikar tools`.
    fn name(&self) -> &'static str;

    /// Run orientation and script detection, returning the raw report.
    fn detect_script(&self, image_path: &Path) -> Result<String, OcrError>;

    /// Recognize text with the given `+`-joined language packs.
    fn recognize(&self, image_path: &Path, languages: &str, psm: u8) -> Result<String, OcrError>;
}

/// Tesseract language pack names for the two supported scripts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguagePacks {
    pub bangla: String,
    pub english: String,
}

impl Default for LanguagePacks {
    fn default() -> Self {
        Self {
            bangla: "ben".to_string(),
            english: "eng".to_string(),
        }
    }
}

impl LanguagePacks {
    /// Language ordering for a page of the given script. The first pack
    /// is the engine's primary model; mixed pages lean Bangla.
    pub fn ordering(&self, script: ScriptCategory) -> String {
        match script {
            ScriptCategory::English => format!("{}+{}", self.english, self.bangla),
            ScriptCategory::Bangla | ScriptCategory::Mixed => {
                format!("{}+{}", self.bangla, self.english)
            }
        }
    }
}
