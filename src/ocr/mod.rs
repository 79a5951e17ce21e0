//! Rasterization and OCR.
//!
//! - `pdftoppm` (Poppler) renders PDF pages to JPEG
//! - Tesseract recognizes text on the rendered pages
//!
//! Both sit behind traits (`Rasterizer`, `OcrEngine`) so pipelines can be
//! driven with fakes.

mod backend;
mod model_utils;
mod rasterize;
mod tesseract;

pub use backend::{LanguagePacks, OcrEngine, OcrError, PSM_SINGLE_BLOCK};
pub use model_utils::{check_tools, ToolStatus};
pub use rasterize::{PdftoppmRasterizer, RasterError, Rasterizer, DEFAULT_DPI};
pub use tesseract::TesseractEngine;
