//! Per-request extraction models.
//!
//! Nothing here outlives one extraction call: a PDF is read into an
//! `ExtractionResult`, serialized, and dropped.

use std::borrow::Cow;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Writing system detected for a document sample or a page image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptCategory {
    Bangla,
    English,
    Mixed,
}

impl ScriptCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bangla => "bangla",
            Self::English => "english",
            Self::Mixed => "mixed",
        }
    }
}

impl std::fmt::Display for ScriptCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Extraction pipeline picked by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStrategy {
    /// Read the embedded text layer, no rasterization.
    #[value(name = "no-ocr", alias = "no_ocr")]
    DirectText,
    /// Rasterize pages and run Tesseract.
    #[value(name = "ocr")]
    Ocr,
    /// Rasterize pages and ask a hosted vision-language model.
    #[value(name = "vision-model", aliases = ["vision_model", "genai"])]
    VisionModel,
}

impl ExtractionStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DirectText => "no_ocr",
            Self::Ocr => "ocr",
            Self::VisionModel => "vision_model",
        }
    }

    /// Parse a form/CLI value. Accepts both `_` and `-` spellings and the
    /// older `genai` name for the vision pipeline.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "no_ocr" | "direct" | "direct_text" => Some(Self::DirectText),
            "ocr" => Some(Self::Ocr),
            "vision_model" | "vision" | "genai" => Some(Self::VisionModel),
            _ => None,
        }
    }

    /// Whether the strategy needs an API credential.
    pub fn requires_credential(&self) -> bool {
        matches!(self, Self::VisionModel)
    }
}

impl std::fmt::Display for ExtractionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Serialized output form.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Txt,
    Docx,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Txt => "txt",
            Self::Docx => "docx",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "txt" | "text" => Some(Self::Txt),
            "docx" | "word" => Some(Self::Docx),
            _ => None,
        }
    }

    /// File extension for artifacts of this format.
    pub fn extension(&self) -> &'static str {
        self.as_str()
    }
}

/// Outcome of extracting one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageStatus {
    Ok,
    Failed,
}

/// Extracted text for a single page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult {
    /// 1-based page number.
    pub page_index: u32,
    pub status: PageStatus,
    /// Extracted text. Empty for failed pages.
    pub text: String,
    /// Why the page failed, for logs.
    pub error: Option<String>,
}

impl PageResult {
    pub fn ok(page_index: u32, text: impl Into<String>) -> Self {
        Self {
            page_index,
            status: PageStatus::Ok,
            text: text.into(),
            error: None,
        }
    }

    pub fn failed(page_index: u32, error: impl Into<String>) -> Self {
        Self {
            page_index,
            status: PageStatus::Failed,
            text: String::new(),
            error: Some(error.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == PageStatus::Ok
    }

    /// Marker written in place of a page that could not be extracted.
    pub fn placeholder(page_index: u32) -> String {
        format!("--- ERROR EXTRACTING PAGE {} ---", page_index)
    }

    /// Text as it should appear in serialized output.
    pub fn display_text(&self) -> Cow<'_, str> {
        match self.status {
            PageStatus::Ok => Cow::Borrowed(&self.text),
            PageStatus::Failed => Cow::Owned(Self::placeholder(self.page_index)),
        }
    }
}

/// All page results for one document, in page order.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    pub strategy: ExtractionStrategy,
    /// Script the pipeline settled on, if it ran detection.
    pub script: Option<ScriptCategory>,
    pub pages: Vec<PageResult>,
}

impl ExtractionResult {
    pub fn new(
        strategy: ExtractionStrategy,
        script: Option<ScriptCategory>,
        pages: Vec<PageResult>,
    ) -> Self {
        Self {
            strategy,
            script,
            pages,
        }
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.pages.iter().any(|p| !p.is_ok())
    }

    pub fn failed_pages(&self) -> Vec<u32> {
        self.pages
            .iter()
            .filter(|p| !p.is_ok())
            .map(|p| p.page_index)
            .collect()
    }
}

/// Input to the strategy orchestrator.
#[derive(Debug, Clone)]
pub struct ProcessRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub strategy: ExtractionStrategy,
    pub format: OutputFormat,
    pub api_key: Option<String>,
}

/// What a successful orchestrator call produced.
#[derive(Debug, Clone)]
pub struct ProcessOutcome {
    pub output_path: PathBuf,
    pub page_count: usize,
    pub has_errors: bool,
    pub script: Option<ScriptCategory>,
}
