//! Web interface for one-off extractions.
//!
//! Upload a PDF, pick a strategy and format, download the result. Each
//! request runs its extraction on a blocking thread with its own scratch
//! directory.

mod assets;
mod handlers;
mod routes;
mod templates;

pub use routes::{create_router, MAX_UPLOAD_BYTES};

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::ExtractorConfig;
use crate::extract::Orchestrator;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
    /// Uploads land here briefly; results stay for download.
    pub upload_dir: PathBuf,
}

impl AppState {
    pub fn new(settings: &ExtractorConfig) -> Self {
        Self {
            orchestrator: Arc::new(Orchestrator::new(settings)),
            upload_dir: settings.upload_dir.clone(),
        }
    }
}

/// Start the web server.
pub async fn serve(settings: &ExtractorConfig, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(settings);
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use std::path::Path;
    use tempfile::tempdir;
    use tower::ServiceExt;

    use crate::extract::Components;
    use crate::ocr::{OcrEngine, OcrError, RasterError, Rasterizer};
    use crate::pdf::{PageRange, TextLayerError, TextLayerReader};
    use crate::vision::{VisionConnector, VisionError, VisionModel};

    struct FakeReader;

    impl TextLayerReader for FakeReader {
        fn read_pages(
            &self,
            _pdf_path: &Path,
            _range: Option<PageRange>,
        ) -> Result<Vec<String>, TextLayerError> {
            Ok(vec!["Annual report".into(), "Second page".into()])
        }
    }

    struct NoRasterizer;

    impl Rasterizer for NoRasterizer {
        fn rasterize(&self, _pdf: &Path, _out: &Path) -> Result<Vec<PathBuf>, RasterError> {
            Err(RasterError::Failed("not in tests".into()))
        }
    }

    struct NoEngine;

    impl OcrEngine for NoEngine {
        fn name(&self) -> &'static str {
            "none"
        }

        fn detect_script(&self, _image: &Path) -> Result<String, OcrError> {
            Err(OcrError::OcrFailed("not in tests".into()))
        }

        fn recognize(&self, _image: &Path, _lang: &str, _psm: u8) -> Result<String, OcrError> {
            Err(OcrError::OcrFailed("not in tests".into()))
        }
    }

    struct NoVision;

    impl VisionConnector for NoVision {
        fn connect(&self, _api_key: &str) -> Result<Box<dyn VisionModel>, VisionError> {
            Err(VisionError::Init("not in tests".into()))
        }
    }

    fn setup_test_app() -> (axum::Router, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let settings = ExtractorConfig {
            upload_dir: dir.path().to_path_buf(),
            temp_root: Some(dir.path().join("tmp")),
            ..ExtractorConfig::default()
        };
        let components = Components {
            rasterizer: Arc::new(NoRasterizer),
            ocr_engine: Arc::new(NoEngine),
            raw_reader: Arc::new(FakeReader),
            page_reader: Arc::new(FakeReader),
            vision: Arc::new(NoVision),
        };
        let state = AppState {
            orchestrator: Arc::new(Orchestrator::with_components(components, &settings)),
            upload_dir: settings.upload_dir.clone(),
        };
        (create_router(state), dir)
    }

    const BOUNDARY: &str = "lipikar-test-boundary";

    fn multipart_request(file_name: &str, content: &[u8], fields: &[(&str, &str)]) -> Request<Body> {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                    BOUNDARY, name, value
                )
                .as_bytes(),
            );
        }
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"pdf_file\"; filename=\"{}\"\r\nContent-Type: application/pdf\r\n\r\n",
                BOUNDARY, file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

        Request::builder()
            .method("POST")
            .uri("/process")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn location(response: &axum::response::Response) -> String {
        response
            .headers()
            .get(header::LOCATION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_index_shows_error() {
        let (app, _dir) = setup_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/?error=Something%20broke")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Something broke"));
        assert!(html.contains("name=\"processing_method\""));
    }

    #[tokio::test]
    async fn test_rejects_non_pdf() {
        let (app, _dir) = setup_test_app();

        let response = app
            .oneshot(multipart_request(
                "notes.pdf",
                b"just some text",
                &[("processing_method", "no_ocr")],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(location(&response).starts_with("/?error=Invalid%20file%20format"));
    }

    #[tokio::test]
    async fn test_vision_requires_key() {
        let (app, dir) = setup_test_app();

        let response = app
            .oneshot(multipart_request(
                "scan.pdf",
                b"%PDF-1.4\n%test\n",
                &[("processing_method", "vision_model"), ("api_key", "  ")],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(location(&response).contains("API%20key%20is%20required"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_process_and_download() {
        let (app, dir) = setup_test_app();

        let response = app
            .clone()
            .oneshot(multipart_request(
                "report.pdf",
                b"%PDF-1.4\n%test\n",
                &[("processing_method", "no_ocr"), ("output_format", "txt")],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let target = location(&response);
        assert!(target.starts_with("/download/report-"));
        assert!(target.ends_with(".txt"));

        // Upload removed, result kept
        let files: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .filter(|name| name != "tmp")
            .collect();
        assert_eq!(files.len(), 1);
        assert!(files[0].starts_with("report-"));

        let response = app
            .clone()
            .oneshot(Request::builder().uri(&target).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("/direct-download/report-"));

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("{}?direct=true", target))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let disposition = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("attachment;"));
        assert_eq!(body_text(response).await, "Annual report\n\nSecond page");
    }

    #[tokio::test]
    async fn test_missing_download() {
        let (app, _dir) = setup_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/direct-download/nothing.txt")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
