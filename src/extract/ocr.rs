//! Rasterize-then-OCR extraction.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::{require_input, scratch_dir, ExtractError};
use crate::detect::detect_from_image;
use crate::models::{ExtractionResult, ExtractionStrategy, PageResult};
use crate::ocr::{LanguagePacks, OcrEngine, Rasterizer, PSM_SINGLE_BLOCK};

/// Rasterizes every page and runs the OCR engine on each one in order.
pub struct OcrExtractor {
    rasterizer: Arc<dyn Rasterizer>,
    engine: Arc<dyn OcrEngine>,
    packs: LanguagePacks,
    temp_root: Option<PathBuf>,
}

impl OcrExtractor {
    pub fn new(
        rasterizer: Arc<dyn Rasterizer>,
        engine: Arc<dyn OcrEngine>,
        packs: LanguagePacks,
        temp_root: Option<PathBuf>,
    ) -> Self {
        Self {
            rasterizer,
            engine,
            packs,
            temp_root,
        }
    }

    pub fn extract(&self, input: &Path) -> Result<ExtractionResult, ExtractError> {
        require_input(input)?;

        let scratch = scratch_dir(self.temp_root.as_deref())?;
        let images = self.rasterizer.rasterize(input, scratch.path())?;
        if images.is_empty() {
            return Err(ExtractError::Conversion(format!(
                "No pages rendered from {}",
                input.display()
            )));
        }
        info!("Rasterized {} pages", images.len());

        // Page 1 decides the language ordering for the whole document
        let script = detect_from_image(self.engine.as_ref(), &images[0], &self.packs);
        let languages = self.packs.ordering(script);
        info!("Detected script: {} (languages {})", script, languages);

        let mut pages = Vec::with_capacity(images.len());
        for (i, image) in images.iter().enumerate() {
            let page_index = i as u32 + 1;
            debug!("OCR page {}/{}", page_index, images.len());
            match self
                .engine
                .recognize(image, &languages, PSM_SINGLE_BLOCK)
            {
                Ok(text) => pages.push(PageResult::ok(page_index, text.trim_end())),
                Err(e) => {
                    warn!("OCR failed on page {}: {}", page_index, e);
                    pages.push(PageResult::failed(page_index, e.to_string()));
                }
            }
        }

        Ok(ExtractionResult::new(
            ExtractionStrategy::Ocr,
            Some(script),
            pages,
        ))
    }
}
