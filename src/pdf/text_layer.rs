//! Embedded text-layer readers.
//!
//! Two readers exist because they disagree on legacy-encoded documents:
//! `pdftotext` hands back the raw glyph codes the legacy converter expects,
//! while `lopdf` decodes through the font encodings and reads English
//! documents with better word spacing.

use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;
use tracing::debug;

/// Errors from text-layer readers.
#[derive(Debug, Error)]
pub enum TextLayerError {
    #[error("Text reader not available: {0}")]
    NotAvailable(String),

    #[error("Failed to read text layer: {0}")]
    ReadFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Inclusive, 1-based page range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub first: u32,
    pub last: u32,
}

impl PageRange {
    pub fn new(first: u32, last: u32) -> Self {
        Self { first, last }
    }
}

/// Reads the embedded text of a PDF, one string per page.
pub trait TextLayerReader: Send + Sync {
    fn read_pages(
        &self,
        pdf_path: &Path,
        range: Option<PageRange>,
    ) -> Result<Vec<String>, TextLayerError>;
}

/// Reader backed by Poppler's `pdftotext`.
pub struct PdftotextReader {
    binary: PathBuf,
}

impl PdftotextReader {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for PdftotextReader {
    fn default() -> Self {
        Self::new("pdftotext")
    }
}

impl TextLayerReader for PdftotextReader {
    fn read_pages(
        &self,
        pdf_path: &Path,
        range: Option<PageRange>,
    ) -> Result<Vec<String>, TextLayerError> {
        let mut cmd = Command::new(&self.binary);
        cmd.args(["-enc", "UTF-8"]);
        if let Some(range) = range {
            cmd.args(["-f", &range.first.to_string(), "-l", &range.last.to_string()]);
        }
        cmd.arg(pdf_path).arg("-");
        debug!("Running {:?}", cmd);

        let output = match cmd.output() {
            Ok(output) => output,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(TextLayerError::NotAvailable(format!(
                    "{} not found (install poppler-utils)",
                    self.binary.display()
                )))
            }
            Err(e) => return Err(TextLayerError::Io(e)),
        };

        if !output.status.success() {
            return Err(TextLayerError::ReadFailed(format!(
                "pdftotext failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(split_pages(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Split `pdftotext` output on form feeds. Every page is terminated by one,
/// so the trailing empty segment is dropped.
pub fn split_pages(text: &str) -> Vec<String> {
    let mut pages: Vec<String> = text.split('\x0c').map(str::to_string).collect();
    if pages.len() > 1 && pages.last().map(|p| p.is_empty()).unwrap_or(false) {
        pages.pop();
    }
    pages
}

/// Reader backed by `lopdf`, decoding each page's content stream.
#[derive(Default)]
pub struct LopdfReader;

impl LopdfReader {
    pub fn new() -> Self {
        Self
    }
}

impl TextLayerReader for LopdfReader {
    fn read_pages(
        &self,
        pdf_path: &Path,
        range: Option<PageRange>,
    ) -> Result<Vec<String>, TextLayerError> {
        let doc = lopdf::Document::load(pdf_path)
            .map_err(|e| TextLayerError::ReadFailed(format!("{}: {}", pdf_path.display(), e)))?;

        let mut pages = Vec::new();
        for page_num in doc.get_pages().keys().copied() {
            if let Some(range) = range {
                if page_num < range.first || page_num > range.last {
                    continue;
                }
            }
            let text = doc.extract_text(&[page_num]).map_err(|e| {
                TextLayerError::ReadFailed(format!("page {}: {}", page_num, e))
            })?;
            pages.push(text);
        }
        debug!("Read {} pages from {}", pages.len(), pdf_path.display());
        Ok(pages)
    }
}
