//! Tesseract OCR engine.
//!
//! Drives the `tesseract` command-line tool. Output goes to stdout so no
//! sidecar text files are left next to the page images.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tracing::debug;

use super::backend::{OcrEngine, OcrError};

/// Tesseract OCR engine.
pub struct TesseractEngine {
    binary: PathBuf,
}

impl TesseractEngine {
    pub fn new() -> Self {
        Self::with_binary("tesseract")
    }

    /// Use a specific `tesseract` executable.
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Run tesseract on one image with output sent to stdout. A non-zero
    /// exit is an `OcrFailed` error labelled with `what`.
    fn run(&self, image_path: &Path, args: &[&str], what: &str) -> Result<Output, OcrError> {
        debug!(
            "Running {} {} {:?}",
            self.binary.display(),
            image_path.display(),
            args
        );
        let output = Command::new(&self.binary)
            .arg(image_path)
            .arg("stdout")
            .args(args)
            .output();

        match output {
            Ok(output) if output.status.success() => Ok(output),
            Ok(output) => Err(OcrError::OcrFailed(format!(
                "{} failed: {}",
                what,
                String::from_utf8_lossy(&output.stderr).trim()
            ))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(OcrError::EngineNotAvailable(format!(
                    "{} not found (install tesseract-ocr)",
                    self.binary.display()
                )))
            }
            Err(e) => Err(OcrError::Io(e)),
        }
    }
}

impl Default for TesseractEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl OcrEngine for TesseractEngine {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn detect_script(&self, image_path: &Path) -> Result<String, OcrError> {
        // OSD writes its report to stderr on some builds
        let output = self.run(image_path, &["--psm", "0"], "tesseract OSD")?;
        let mut report = String::from_utf8_lossy(&output.stdout).to_string();
        report.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(report)
    }

    fn recognize(&self, image_path: &Path, languages: &str, psm: u8) -> Result<String, OcrError> {
        let psm = psm.to_string();
        let output = self.run(
            image_path,
            &["-l", languages, "--oem", "3", "--psm", &psm],
            "tesseract",
        )?;
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}
