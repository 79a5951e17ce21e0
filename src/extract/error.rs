use std::path::PathBuf;

use thiserror::Error;

use crate::ocr::RasterError;
use crate::output::OutputError;
use crate::pdf::TextLayerError;

/// Fatal extraction errors. Per-page failures never surface here; they
/// become failed `PageResult`s.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Conversion failed: {0}")]
    Conversion(String),

    #[error("An API key is required for the vision model strategy")]
    CredentialMissing,

    #[error("Vision model initialization failed: {0}")]
    ModelInit(String),

    #[error("Failed to write output: {0}")]
    Output(#[from] OutputError),
}

impl From<RasterError> for ExtractError {
    fn from(e: RasterError) -> Self {
        ExtractError::Conversion(e.to_string())
    }
}

impl From<TextLayerError> for ExtractError {
    fn from(e: TextLayerError) -> Self {
        ExtractError::Conversion(e.to_string())
    }
}
