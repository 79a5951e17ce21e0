//! PDF page rasterization.

use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;
use tracing::debug;

/// Default rendering resolution.
pub const DEFAULT_DPI: u32 = 300;

/// Errors from rasterization.
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("Rasterizer not available: {0}")]
    NotAvailable(String),

    #[error("Rasterization failed: {0}")]
    Failed(String),

    #[error("Document has no pages")]
    NoPages,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Renders every page of a PDF to an image file.
pub trait Rasterizer: Send + Sync {
    /// Rasterize all pages into `out_dir`, returning image paths in page
    /// order.
    fn rasterize(&self, pdf_path: &Path, out_dir: &Path) -> Result<Vec<PathBuf>, RasterError>;
}

/// Rasterizer backed by Poppler's `pdftoppm`.
pub struct PdftoppmRasterizer {
    binary: PathBuf,
    dpi: u32,
}

impl PdftoppmRasterizer {
    pub fn new(binary: impl Into<PathBuf>, dpi: u32) -> Self {
        Self {
            binary: binary.into(),
            dpi,
        }
    }
}

impl Default for PdftoppmRasterizer {
    fn default() -> Self {
        Self::new("pdftoppm", DEFAULT_DPI)
    }
}

impl Rasterizer for PdftoppmRasterizer {
    fn rasterize(&self, pdf_path: &Path, out_dir: &Path) -> Result<Vec<PathBuf>, RasterError> {
        let dpi = self.dpi.to_string();
        let prefix = out_dir.join("page");
        debug!(
            "Rasterizing {} at {} DPI into {}",
            pdf_path.display(),
            dpi,
            out_dir.display()
        );

        let output = Command::new(&self.binary)
            .args(["-jpeg", "-r", &dpi])
            .arg(pdf_path)
            .arg(&prefix)
            .output();

        match output {
            Ok(o) if o.status.success() => {}
            Ok(o) => {
                return Err(RasterError::Failed(format!(
                    "pdftoppm failed: {}",
                    String::from_utf8_lossy(&o.stderr).trim()
                )))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(RasterError::NotAvailable(format!(
                    "{} not found (install poppler-utils)",
                    self.binary.display()
                )))
            }
            Err(e) => return Err(RasterError::Io(e)),
        }

        let pages = collect_page_images(out_dir)?;
        if pages.is_empty() {
            return Err(RasterError::NoPages);
        }
        Ok(pages)
    }
}

/// Page number from a `pdftoppm` output name like `page-07.jpg`.
fn page_number(path: &Path) -> Option<u32> {
    let stem = path.file_stem()?.to_str()?;
    let (prefix, num) = stem.rsplit_once('-')?;
    if prefix != "page" {
        return None;
    }
    num.parse().ok()
}

/// Find rendered pages in `dir`, sorted numerically. `pdftoppm` pads the
/// number to the width of the page count, so lexical order is not enough
/// across runs with different widths.
fn collect_page_images(dir: &Path) -> Result<Vec<PathBuf>, RasterError> {
    let mut pages: Vec<(u32, PathBuf)> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case("jpg") || e.eq_ignore_ascii_case("jpeg"))
                .unwrap_or(false)
        })
        .filter_map(|path| page_number(&path).map(|n| (n, path)))
        .collect();

    pages.sort_by_key(|(n, _)| *n);
    Ok(pages.into_iter().map(|(_, p)| p).collect())
}
