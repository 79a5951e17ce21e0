//! End-to-end pipeline tests with in-process stand-ins for the external
//! rasterizer, OCR engine, text-layer reader and vision model.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use lipikar::config::ExtractorConfig;
use lipikar::extract::{Components, ExtractError, Orchestrator};
use lipikar::models::{ExtractionStrategy, OutputFormat, ProcessRequest};
use lipikar::ocr::{OcrEngine, OcrError, RasterError, Rasterizer};
use lipikar::pdf::{PageRange, TextLayerError, TextLayerReader};
use lipikar::vision::{VisionConnector, VisionError, VisionModel, VisionResponse};
use tempfile::TempDir;

/// Writes `pages` fake JPEGs and remembers where it put them.
struct PageRasterizer {
    pages: usize,
    last_dir: Mutex<Option<PathBuf>>,
}

impl PageRasterizer {
    fn new(pages: usize) -> Self {
        Self {
            pages,
            last_dir: Mutex::new(None),
        }
    }

    fn last_dir(&self) -> Option<PathBuf> {
        self.last_dir.lock().unwrap().clone()
    }
}

impl Rasterizer for PageRasterizer {
    fn rasterize(&self, _pdf: &Path, out_dir: &Path) -> Result<Vec<PathBuf>, RasterError> {
        *self.last_dir.lock().unwrap() = Some(out_dir.to_path_buf());
        if self.pages == 0 {
            return Err(RasterError::NoPages);
        }
        (1..=self.pages)
            .map(|i| {
                let path = out_dir.join(format!("page-{}.jpg", i));
                std::fs::write(&path, [0xFF, 0xD8, 0xFF, 0xE0])?;
                Ok(path)
            })
            .collect()
    }
}

/// Reads "Latin" from OSD and echoes the page file name; fails on one page.
struct EchoEngine {
    fail_on: Option<&'static str>,
}

impl OcrEngine for EchoEngine {
    fn name(&self) -> &'static str {
        "echo"
    }

    fn detect_script(&self, _image: &Path) -> Result<String, OcrError> {
        Ok("Orientation in degrees: 0\nScript: Latin\n".into())
    }

    fn recognize(&self, image: &Path, _languages: &str, _psm: u8) -> Result<String, OcrError> {
        let name = image.file_stem().unwrap().to_str().unwrap();
        if self.fail_on == Some(name) {
            return Err(OcrError::OcrFailed("engine crashed".into()));
        }
        Ok(format!("text of {}\n\n", name))
    }
}

struct FixedReader(Vec<&'static str>);

impl TextLayerReader for FixedReader {
    fn read_pages(
        &self,
        _pdf_path: &Path,
        range: Option<PageRange>,
    ) -> Result<Vec<String>, TextLayerError> {
        let pages = self.0.iter().map(|p| p.to_string());
        Ok(match range {
            Some(r) => pages
                .skip(r.first as usize - 1)
                .take((r.last - r.first + 1) as usize)
                .collect(),
            None => pages.collect(),
        })
    }
}

/// Transcribes every page. When listed in `bad_pages`, page 2 gets an
/// unreadable reply and page 3 an API error. Pages arrive in order, so the
/// call count is the page number.
struct ScriptedModel {
    calls: AtomicUsize,
    bad_pages: &'static [usize],
}

impl VisionModel for ScriptedModel {
    fn transcribe(
        &self,
        _prompt: &str,
        image_base64: &str,
        mime_type: &str,
    ) -> Result<VisionResponse, VisionError> {
        assert_eq!(mime_type, "image/jpeg");
        assert!(!image_base64.is_empty());
        let page = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        match page {
            2 if self.bad_pages.contains(&2) => Ok(VisionResponse::Unparseable),
            3 if self.bad_pages.contains(&3) => Err(VisionError::Api {
                status: 500,
                message: "internal error".into(),
            }),
            _ => Ok(VisionResponse::Parts(vec![
                "transcribed ".into(),
                "page".into(),
            ])),
        }
    }
}

struct CountingConnector {
    connects: AtomicUsize,
    bad_pages: &'static [usize],
}

impl VisionConnector for CountingConnector {
    fn connect(&self, _api_key: &str) -> Result<Box<dyn VisionModel>, VisionError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(ScriptedModel {
            calls: AtomicUsize::new(0),
            bad_pages: self.bad_pages,
        }))
    }
}

struct Fixture {
    dir: TempDir,
    input: PathBuf,
    temp_root: PathBuf,
    rasterizer: Arc<PageRasterizer>,
    connector: Arc<CountingConnector>,
    orchestrator: Orchestrator,
}

impl Fixture {
    fn new(pages: usize, fail_on: Option<&'static str>) -> Self {
        Self::build(pages, fail_on, &[])
    }

    fn with_bad_vision_pages(pages: usize, bad_pages: &'static [usize]) -> Self {
        Self::build(pages, None, bad_pages)
    }

    fn build(
        pages: usize,
        fail_on: Option<&'static str>,
        bad_pages: &'static [usize],
    ) -> Self {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("input.pdf");
        std::fs::write(&input, b"%PDF-1.4\n").unwrap();
        let temp_root = dir.path().join("scratch");

        let settings = ExtractorConfig {
            temp_root: Some(temp_root.clone()),
            ..ExtractorConfig::default()
        };
        let rasterizer = Arc::new(PageRasterizer::new(pages));
        let connector = Arc::new(CountingConnector {
            connects: AtomicUsize::new(0),
            bad_pages,
        });
        let reader = Arc::new(FixedReader(vec!["one", "two", "three"]));
        let components = Components {
            rasterizer: rasterizer.clone(),
            ocr_engine: Arc::new(EchoEngine { fail_on }),
            raw_reader: reader.clone(),
            page_reader: reader,
            vision: connector.clone(),
        };

        Self {
            orchestrator: Orchestrator::with_components(components, &settings),
            dir,
            input,
            temp_root,
            rasterizer,
            connector,
        }
    }

    fn request(&self, strategy: ExtractionStrategy, format: OutputFormat) -> ProcessRequest {
        ProcessRequest {
            input: self.input.clone(),
            output: self
                .dir
                .path()
                .join("out")
                .join(format!("result.{}", format.extension())),
            strategy,
            format,
            api_key: Some("test-key".into()),
        }
    }

    fn scratch_entries(&self) -> usize {
        match std::fs::read_dir(&self.temp_root) {
            Ok(entries) => entries.count(),
            Err(_) => 0,
        }
    }
}

#[test]
fn test_one_result_per_page_for_every_strategy() {
    let fixture = Fixture::new(3, None);

    for strategy in [
        ExtractionStrategy::DirectText,
        ExtractionStrategy::Ocr,
        ExtractionStrategy::VisionModel,
    ] {
        let request = fixture.request(strategy, OutputFormat::Txt);
        let outcome = fixture.orchestrator.process(&request).unwrap();
        assert_eq!(outcome.page_count, 3, "strategy {}", strategy);
        assert!(!outcome.has_errors);
        assert_eq!(outcome.output_path, request.output);
        assert!(request.output.is_file());
    }
}

#[test]
fn test_failed_ocr_page_keeps_its_place() {
    let fixture = Fixture::new(3, Some("page-2"));
    let request = fixture.request(ExtractionStrategy::Ocr, OutputFormat::Txt);

    let outcome = fixture.orchestrator.process(&request).unwrap();
    assert_eq!(outcome.page_count, 3);
    assert!(outcome.has_errors);

    let text = std::fs::read_to_string(&request.output).unwrap();
    let pages: Vec<&str> = text.split("\n\n--- Page Break ---\n\n").collect();
    assert_eq!(pages.len(), 3);
    assert_eq!(pages[0], "--- Page 1 ---\ntext of page-1");
    assert_eq!(pages[1], "--- Page 2 ---\n--- ERROR EXTRACTING PAGE 2 ---");
    assert_eq!(pages[2], "--- Page 3 ---\ntext of page-3");
}

#[test]
fn test_direct_text_output() {
    let fixture = Fixture::new(3, None);
    let request = fixture.request(ExtractionStrategy::DirectText, OutputFormat::Txt);

    let outcome = fixture.orchestrator.process(&request).unwrap();
    assert_eq!(outcome.script, Some(lipikar::models::ScriptCategory::English));
    assert_eq!(
        std::fs::read_to_string(&request.output).unwrap(),
        "one\n\ntwo\n\nthree"
    );
    // The text layer path never rasterizes
    assert!(fixture.rasterizer.last_dir().is_none());
}

#[test]
fn test_missing_credential_touches_nothing() {
    let fixture = Fixture::new(3, None);
    let mut request = fixture.request(ExtractionStrategy::VisionModel, OutputFormat::Txt);
    request.api_key = Some("   ".into());

    let err = fixture.orchestrator.process(&request).unwrap_err();
    assert!(matches!(err, ExtractError::CredentialMissing));
    assert_eq!(fixture.connector.connects.load(Ordering::SeqCst), 0);
    assert!(fixture.rasterizer.last_dir().is_none());
    assert_eq!(fixture.scratch_entries(), 0);
    assert!(!request.output.exists());

    request.api_key = None;
    let err = fixture.orchestrator.process(&request).unwrap_err();
    assert!(matches!(err, ExtractError::CredentialMissing));
}

#[test]
fn test_scratch_removed_after_success() {
    let fixture = Fixture::new(2, None);

    for strategy in [ExtractionStrategy::Ocr, ExtractionStrategy::VisionModel] {
        let request = fixture.request(strategy, OutputFormat::Txt);
        fixture.orchestrator.process(&request).unwrap();

        let scratch = fixture.rasterizer.last_dir().unwrap();
        assert!(scratch.starts_with(&fixture.temp_root));
        assert!(!scratch.exists(), "strategy {}", strategy);
    }
    assert_eq!(fixture.scratch_entries(), 0);
}

#[test]
fn test_failed_vision_pages_keep_their_place() {
    let fixture = Fixture::with_bad_vision_pages(4, &[2, 3]);
    let request = fixture.request(ExtractionStrategy::VisionModel, OutputFormat::Txt);

    let outcome = fixture.orchestrator.process(&request).unwrap();
    assert_eq!(outcome.page_count, 4);
    assert!(outcome.has_errors);

    let text = std::fs::read_to_string(&request.output).unwrap();
    let pages: Vec<&str> = text.split("\n\n--- Page Break ---\n\n").collect();
    assert_eq!(
        pages,
        vec![
            "--- Page 1 ---\ntranscribed page",
            "--- Page 2 ---\n--- ERROR EXTRACTING PAGE 2 ---",
            "--- Page 3 ---\n--- ERROR EXTRACTING PAGE 3 ---",
            "--- Page 4 ---\ntranscribed page",
        ]
    );

    assert!(!fixture.rasterizer.last_dir().unwrap().exists());
    assert_eq!(fixture.scratch_entries(), 0);
}

#[test]
fn test_fatal_error_leaves_nothing_behind() {
    let fixture = Fixture::new(0, None);

    for strategy in [ExtractionStrategy::Ocr, ExtractionStrategy::VisionModel] {
        let request = fixture.request(strategy, OutputFormat::Docx);
        let err = fixture.orchestrator.process(&request).unwrap_err();
        assert!(matches!(err, ExtractError::Conversion(_)));
        assert!(!request.output.exists());

        let scratch = fixture.rasterizer.last_dir().unwrap();
        assert!(!scratch.exists());
    }
    assert_eq!(fixture.scratch_entries(), 0);
}

#[test]
fn test_missing_input() {
    let fixture = Fixture::new(3, None);
    let mut request = fixture.request(ExtractionStrategy::Ocr, OutputFormat::Txt);
    request.input = fixture.dir.path().join("absent.pdf");

    let err = fixture.orchestrator.process(&request).unwrap_err();
    assert!(matches!(err, ExtractError::InputNotFound(_)));
    assert!(fixture.rasterizer.last_dir().is_none());
}

#[test]
fn test_vision_docx_has_page_breaks() {
    let fixture = Fixture::new(2, None);
    let request = fixture.request(ExtractionStrategy::VisionModel, OutputFormat::Docx);

    fixture.orchestrator.process(&request).unwrap();
    assert_eq!(fixture.connector.connects.load(Ordering::SeqCst), 1);

    let file = std::fs::File::open(&request.output).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let mut document = String::new();
    archive
        .by_name("word/document.xml")
        .unwrap()
        .read_to_string(&mut document)
        .unwrap();

    assert_eq!(document.matches("transcribed page").count(), 2);
    assert_eq!(document.matches(r#"<w:br w:type="page"/>"#).count(), 2);
}
