//! Strategy dispatch.

use std::sync::Arc;

use tracing::{info, warn};

use super::{DirectTextExtractor, ExtractError, OcrExtractor, VisionExtractor};
use crate::config::ExtractorConfig;
use crate::models::{ExtractionStrategy, ProcessOutcome, ProcessRequest};
use crate::ocr::{OcrEngine, PdftoppmRasterizer, Rasterizer, TesseractEngine};
use crate::output;
use crate::pdf::{LopdfReader, PdftotextReader, TextLayerReader};
use crate::vision::{GeminiConnector, VisionConnector};

/// External services the pipelines run on.
#[derive(Clone)]
pub struct Components {
    pub rasterizer: Arc<dyn Rasterizer>,
    pub ocr_engine: Arc<dyn OcrEngine>,
    /// Raw-glyph reader used for sampling and Bangla documents.
    pub raw_reader: Arc<dyn TextLayerReader>,
    /// Page-wise reader used for English documents.
    pub page_reader: Arc<dyn TextLayerReader>,
    pub vision: Arc<dyn VisionConnector>,
}

impl Components {
    /// The production stack: Poppler, Tesseract, lopdf and Gemini.
    pub fn from_config(config: &ExtractorConfig) -> Self {
        Self {
            rasterizer: Arc::new(PdftoppmRasterizer::new(
                &config.rasterizer_binary,
                config.rasterization_dpi,
            )),
            ocr_engine: Arc::new(TesseractEngine::with_binary(&config.ocr_binary)),
            raw_reader: Arc::new(PdftotextReader::new(&config.text_reader_binary)),
            page_reader: Arc::new(LopdfReader::new()),
            vision: Arc::new(GeminiConnector::new(
                config.vision_api_base.clone(),
                config.vision_model.clone(),
                config.vision_timeout,
            )),
        }
    }
}

/// Runs exactly one pipeline per request and writes its output.
pub struct Orchestrator {
    direct: DirectTextExtractor,
    ocr: OcrExtractor,
    vision: VisionExtractor,
}

impl Orchestrator {
    pub fn new(config: &ExtractorConfig) -> Self {
        Self::with_components(Components::from_config(config), config)
    }

    pub fn with_components(components: Components, config: &ExtractorConfig) -> Self {
        Self {
            direct: DirectTextExtractor::new(components.raw_reader, components.page_reader),
            ocr: OcrExtractor::new(
                components.rasterizer.clone(),
                components.ocr_engine,
                config.language_packs.clone(),
                config.temp_root.clone(),
            ),
            vision: VisionExtractor::new(
                components.rasterizer,
                components.vision,
                config.temp_root.clone(),
            ),
        }
    }

    /// Extract, serialize, and report where the output went. The first
    /// fatal error is returned as-is and no output file is written.
    pub fn process(&self, request: &ProcessRequest) -> Result<ProcessOutcome, ExtractError> {
        info!(
            "Processing {} with strategy {}",
            request.input.display(),
            request.strategy
        );

        let result = match request.strategy {
            ExtractionStrategy::DirectText => self.direct.extract(&request.input)?,
            ExtractionStrategy::Ocr => self.ocr.extract(&request.input)?,
            ExtractionStrategy::VisionModel => self
                .vision
                .extract(&request.input, request.api_key.as_deref())?,
        };

        if result.has_errors() {
            warn!(
                "{} of {} pages failed: {:?}",
                result.failed_pages().len(),
                result.len(),
                result.failed_pages()
            );
        }

        output::write_output(&result, request.format, &request.output)?;
        info!("Wrote {}", request.output.display());

        Ok(ProcessOutcome {
            output_path: request.output.clone(),
            page_count: result.len(),
            has_errors: result.has_errors(),
            script: result.script,
        })
    }
}
