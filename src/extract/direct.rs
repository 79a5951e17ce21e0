//! Direct text-layer extraction.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::{require_input, ExtractError};
use crate::detect::detect_from_text;
use crate::legacy;
use crate::models::{ExtractionResult, ExtractionStrategy, PageResult, ScriptCategory};
use crate::pdf::{PageRange, TextLayerReader};

/// Pages sampled for script detection.
const SAMPLE_PAGES: PageRange = PageRange { first: 1, last: 3 };

/// Reads the embedded text layer without rasterizing.
///
/// Bangla documents are read with the raw-glyph reader so legacy-encoded
/// text can be repaired; English documents use the page-wise reader.
pub struct DirectTextExtractor {
    raw_reader: Arc<dyn TextLayerReader>,
    page_reader: Arc<dyn TextLayerReader>,
}

impl DirectTextExtractor {
    pub fn new(raw_reader: Arc<dyn TextLayerReader>, page_reader: Arc<dyn TextLayerReader>) -> Self {
        Self {
            raw_reader,
            page_reader,
        }
    }

    pub fn extract(&self, input: &Path) -> Result<ExtractionResult, ExtractError> {
        require_input(input)?;

        let sample = match self.raw_reader.read_pages(input, Some(SAMPLE_PAGES)) {
            Ok(pages) => pages.join("\n"),
            Err(e) => {
                warn!("Could not sample {}: {}", input.display(), e);
                String::new()
            }
        };
        let script = detect_from_text(&sample);
        info!("Detected script: {}", script);

        let texts = match script {
            ScriptCategory::Bangla => self.read_bangla(input)?,
            ScriptCategory::English | ScriptCategory::Mixed => {
                self.page_reader.read_pages(input, None)?
            }
        };

        let pages = texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| PageResult::ok(i as u32 + 1, text))
            .collect();

        Ok(ExtractionResult::new(
            ExtractionStrategy::DirectText,
            Some(script),
            pages,
        ))
    }

    /// Read every page and repair legacy encoding across the whole text.
    fn read_bangla(&self, input: &Path) -> Result<Vec<String>, ExtractError> {
        let raw = self.raw_reader.read_pages(input, None)?;
        let page_count = raw.len();
        let full = raw.join("\x0c");

        let text = match legacy::convert(&full) {
            Ok(converted) if converted != full => {
                info!("Converted legacy-encoded text");
                converted
            }
            Ok(_) => {
                debug!("Text layer is not legacy-encoded");
                full
            }
            Err(e) => {
                warn!("Legacy conversion failed, keeping original text: {}", e);
                full
            }
        };

        let pages: Vec<String> = text.split('\x0c').map(str::to_string).collect();
        debug_assert_eq!(pages.len(), page_count);
        Ok(pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::TextLayerError;
    use std::sync::Mutex;

    struct FakeReader {
        pages: Result<Vec<&'static str>, ()>,
        sample_fails: bool,
        calls: Mutex<Vec<Option<PageRange>>>,
    }

    impl FakeReader {
        fn new(pages: Vec<&'static str>) -> Self {
            Self {
                pages: Ok(pages),
                sample_fails: false,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                pages: Err(()),
                sample_fails: true,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl TextLayerReader for FakeReader {
        fn read_pages(
            &self,
            _pdf_path: &Path,
            range: Option<PageRange>,
        ) -> Result<Vec<String>, TextLayerError> {
            self.calls.lock().unwrap().push(range);
            if range.is_some() && self.sample_fails {
                return Err(TextLayerError::ReadFailed("sample".into()));
            }
            let pages = self
                .pages
                .clone()
                .map_err(|_| TextLayerError::ReadFailed("broken".into()))?;
            Ok(match range {
                Some(r) => pages
                    .into_iter()
                    .skip(r.first as usize - 1)
                    .take((r.last - r.first + 1) as usize)
                    .map(str::to_string)
                    .collect(),
                None => pages.into_iter().map(str::to_string).collect(),
            })
        }
    }

    fn input() -> tempfile::NamedTempFile {
        tempfile::NamedTempFile::new().unwrap()
    }

    #[test]
    fn test_legacy_bangla_is_converted() {
        let raw = Arc::new(FakeReader::new(vec![
            "Avwg ‡`‡k ` ` ` ` ` ` ` ` ` ` `",
            "evsjv‡`k",
            "Kg©",
            "¯‹zj",
        ]));
        let pages = Arc::new(FakeReader::new(vec!["unused"]));
        let extractor = DirectTextExtractor::new(raw.clone(), pages.clone());

        let file = input();
        let result = extractor.extract(file.path()).unwrap();
        assert_eq!(result.script, Some(ScriptCategory::Bangla));
        assert_eq!(result.len(), 4);
        assert_eq!(result.pages[1].text, "বাংলাদেশ");
        assert_eq!(result.pages[2].text, "কর্ম");
        assert_eq!(result.pages[3].page_index, 4);
        assert!(pages.calls.lock().unwrap().is_empty());
        assert_eq!(
            raw.calls.lock().unwrap().as_slice(),
            &[Some(SAMPLE_PAGES), None]
        );
    }

    #[test]
    fn test_english_uses_page_reader() {
        let raw = Arc::new(FakeReader::new(vec!["Annual report", "Page two"]));
        let pages = Arc::new(FakeReader::new(vec!["Annual report", "Page two"]));
        let extractor = DirectTextExtractor::new(raw, pages.clone());

        let file = input();
        let result = extractor.extract(file.path()).unwrap();
        assert_eq!(result.script, Some(ScriptCategory::English));
        assert_eq!(result.len(), 2);
        assert_eq!(result.pages[0].text, "Annual report");
        assert_eq!(pages.calls.lock().unwrap().as_slice(), &[None]);
    }

    #[test]
    fn test_failed_sample_defaults_to_bangla_and_full_read_is_fatal() {
        let extractor = DirectTextExtractor::new(
            Arc::new(FakeReader::failing()),
            Arc::new(FakeReader::new(vec!["x"])),
        );
        let file = input();
        let err = extractor.extract(file.path()).unwrap_err();
        assert!(matches!(err, ExtractError::Conversion(_)));
    }

    #[test]
    fn test_missing_input() {
        let extractor = DirectTextExtractor::new(
            Arc::new(FakeReader::new(vec![])),
            Arc::new(FakeReader::new(vec![])),
        );
        let err = extractor
            .extract(Path::new("/nonexistent/lipikar.pdf"))
            .unwrap_err();
        assert!(matches!(err, ExtractError::InputNotFound(_)));
    }
}
