//! External tool discovery.

use std::path::{Path, PathBuf};

/// Resolve a binary name or path to an executable, if one exists.
pub fn find_binary(name: &Path) -> Option<PathBuf> {
    which::which(name).ok()
}

/// Availability of one external tool.
#[derive(Debug, Clone)]
pub struct ToolStatus {
    /// Role in the pipeline ("rasterizer", "text reader", "ocr").
    pub role: &'static str,
    pub binary: PathBuf,
    pub resolved: Option<PathBuf>,
    pub install_hint: &'static str,
}

impl ToolStatus {
    pub fn is_available(&self) -> bool {
        self.resolved.is_some()
    }
}

/// Probe the configured rasterizer, text reader and OCR binaries.
pub fn check_tools(rasterizer: &Path, text_reader: &Path, ocr: &Path) -> Vec<ToolStatus> {
    [
        ("rasterizer", rasterizer, "apt install poppler-utils"),
        ("text reader", text_reader, "apt install poppler-utils"),
        ("ocr", ocr, "apt install tesseract-ocr tesseract-ocr-ben"),
    ]
    .into_iter()
    .map(|(role, binary, install_hint)| ToolStatus {
        role,
        binary: binary.to_path_buf(),
        resolved: find_binary(binary),
        install_hint,
    })
    .collect()
}
