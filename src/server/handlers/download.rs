//! Result download handlers.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;

use super::super::templates;
use super::super::AppState;
use super::helpers::{content_disposition, resolve_upload};

/// Query params for the download page.
#[derive(Debug, Deserialize)]
pub struct DownloadParams {
    pub direct: Option<String>,
}

/// Confirmation page, or the file itself with `?direct=true`.
pub async fn download_page(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    Query(params): Query<DownloadParams>,
) -> Response {
    if params.direct.as_deref() == Some("true") {
        return serve_attachment(&state, &filename).await;
    }

    if resolve_upload(&state.upload_dir, &filename).is_none() {
        return (StatusCode::NOT_FOUND, "File not found").into_response();
    }
    Html(templates::download_page(&filename)).into_response()
}

/// Serve a result file as an attachment.
pub async fn direct_download(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Response {
    serve_attachment(&state, &filename).await
}

async fn serve_attachment(state: &AppState, filename: &str) -> Response {
    let path = match resolve_upload(&state.upload_dir, filename) {
        Some(p) => p,
        None => return (StatusCode::NOT_FOUND, "File not found").into_response(),
    };

    let content = match tokio::fs::read(&path).await {
        Ok(c) => c,
        Err(_) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to read file").into_response();
        }
    };

    let mime = mime_guess::from_path(&path)
        .first_or_octet_stream()
        .to_string();

    (
        [
            (header::CONTENT_TYPE, mime),
            (header::CONTENT_DISPOSITION, content_disposition(filename)),
        ],
        content,
    )
        .into_response()
}
