//! Extraction pipelines and the orchestrator that dispatches between them.
//!
//! - `direct`: embedded text layer, with legacy-encoding repair for Bangla
//! - `ocr`: rasterize, then Tesseract page by page
//! - `vision`: rasterize, then a hosted vision model page by page
//!
//! Each call owns its scratch directory; nothing is shared between calls.

mod direct;
mod error;
mod ocr;
mod orchestrator;
mod vision;

use std::path::Path;

use tempfile::TempDir;

pub use direct::DirectTextExtractor;
pub use error::ExtractError;
pub use ocr::OcrExtractor;
pub use orchestrator::{Components, Orchestrator};
pub use vision::VisionExtractor;

/// Prefix for per-call scratch directories.
pub const SCRATCH_PREFIX: &str = "lipikar-";

/// Create a uniquely named scratch directory, removed when dropped.
fn scratch_dir(temp_root: Option<&Path>) -> Result<TempDir, ExtractError> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(SCRATCH_PREFIX);
    let dir = match temp_root {
        Some(root) => {
            std::fs::create_dir_all(root).map_err(|e| {
                ExtractError::Conversion(format!(
                    "Cannot create temp root {}: {}",
                    root.display(),
                    e
                ))
            })?;
            builder.tempdir_in(root)
        }
        None => builder.tempdir(),
    };
    dir.map_err(|e| ExtractError::Conversion(format!("Cannot create temp directory: {}", e)))
}

fn require_input(input: &Path) -> Result<(), ExtractError> {
    if input.is_file() {
        Ok(())
    } else {
        Err(ExtractError::InputNotFound(input.to_path_buf()))
    }
}
