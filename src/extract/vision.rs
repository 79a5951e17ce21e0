//! Rasterize-then-vision-model extraction.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::{require_input, scratch_dir, ExtractError};
use crate::models::{ExtractionResult, ExtractionStrategy, PageResult};
use crate::ocr::Rasterizer;
use crate::vision::{
    encode_image_base64, VisionConnector, VisionError, VisionModel, TRANSCRIBE_PROMPT,
};

/// Sends each rendered page to a hosted vision model for transcription.
pub struct VisionExtractor {
    rasterizer: Arc<dyn Rasterizer>,
    connector: Arc<dyn VisionConnector>,
    temp_root: Option<PathBuf>,
}

impl VisionExtractor {
    pub fn new(
        rasterizer: Arc<dyn Rasterizer>,
        connector: Arc<dyn VisionConnector>,
        temp_root: Option<PathBuf>,
    ) -> Self {
        Self {
            rasterizer,
            connector,
            temp_root,
        }
    }

    pub fn extract(
        &self,
        input: &Path,
        api_key: Option<&str>,
    ) -> Result<ExtractionResult, ExtractError> {
        let api_key = api_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(ExtractError::CredentialMissing)?;

        let model = self
            .connector
            .connect(api_key)
            .map_err(|e| ExtractError::ModelInit(e.to_string()))?;

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

        let mut pages = Vec::with_capacity(images.len());
        for (i, image) in images.iter().enumerate() {
            let page_index = i as u32 + 1;
            debug!("Transcribing page {}/{}", page_index, images.len());
            match transcribe_page(model.as_ref(), image) {
                Ok(text) => pages.push(PageResult::ok(page_index, text)),
                Err(e) => {
                    warn!("Vision model failed on page {}: {}", page_index, e);
                    pages.push(PageResult::failed(page_index, e.to_string()));
                }
            }
        }

        Ok(ExtractionResult::new(
            ExtractionStrategy::VisionModel,
            None,
            pages,
        ))
    }
}

fn transcribe_page(model: &dyn VisionModel, image: &Path) -> Result<String, VisionError> {
    let (data, mime_type) = encode_image_base64(image)?;
    model
        .transcribe(TRANSCRIBE_PROMPT, &data, mime_type)?
        .into_text()
        .ok_or(VisionError::Unparseable)
}
