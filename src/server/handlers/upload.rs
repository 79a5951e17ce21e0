//! Upload form and processing handlers.

use axum::{
    body::Bytes,
    extract::{Multipart, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use super::super::templates;
use super::super::AppState;
use super::helpers::{error_redirect, output_file_name};
use crate::models::{ExtractionStrategy, OutputFormat, ProcessRequest};

/// Query params for the index page.
#[derive(Debug, Deserialize)]
pub struct IndexParams {
    pub error: Option<String>,
}

/// Upload form.
pub async fn index(Query(params): Query<IndexParams>) -> Html<String> {
    Html(templates::index_page(params.error.as_deref()))
}

#[derive(Debug, Default)]
struct UploadForm {
    file_name: Option<String>,
    data: Option<Bytes>,
    processing_method: Option<String>,
    output_format: Option<String>,
    api_key: Option<String>,
}

async fn read_form(multipart: &mut Multipart) -> Result<UploadForm, String> {
    let mut form = UploadForm::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Upload failed: {}", e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "pdf_file" => {
                form.file_name = field.file_name().map(str::to_string);
                form.data = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| format!("Upload failed: {}", e.body_text()))?,
                );
            }
            "processing_method" | "output_format" | "api_key" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| format!("Upload failed: {}", e.body_text()))?;
                match name.as_str() {
                    "processing_method" => form.processing_method = Some(value),
                    "output_format" => form.output_format = Some(value),
                    _ => form.api_key = Some(value),
                }
            }
            _ => {}
        }
    }
    Ok(form)
}

fn has_pdf_extension(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// Accept an upload, run the chosen strategy, and redirect to the result.
pub async fn process_upload(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let form = match read_form(&mut multipart).await {
        Ok(form) => form,
        Err(message) => return error_redirect(&message),
    };

    let (file_name, data) = match (form.file_name, form.data) {
        (Some(name), Some(data)) if !name.is_empty() => (name, data),
        _ => return error_redirect("No file selected"),
    };

    let is_pdf = has_pdf_extension(&file_name)
        && infer::get(&data).map(|kind| kind.mime_type()) == Some("application/pdf");
    if !is_pdf {
        return error_redirect("Invalid file format. Only PDF files are allowed.");
    }

    let strategy = match form
        .processing_method
        .as_deref()
        .and_then(ExtractionStrategy::from_str)
    {
        Some(strategy) => strategy,
        None => return error_redirect("Invalid processing method selected"),
    };

    let format = match form.output_format.as_deref() {
        None | Some("") => OutputFormat::Txt,
        Some(value) => match OutputFormat::from_str(value) {
            Some(format) => format,
            None => return error_redirect("Invalid output format selected"),
        },
    };

    let api_key = form.api_key.filter(|k| !k.trim().is_empty());
    if strategy.requires_credential() && api_key.is_none() {
        return error_redirect("API key is required for the vision model strategy");
    }

    let upload_id = uuid::Uuid::new_v4();
    let upload_path = state.upload_dir.join(format!("{}.pdf", upload_id));
    if let Err(e) = tokio::fs::write(&upload_path, &data).await {
        tracing::error!("Failed to store upload {}: {}", upload_path.display(), e);
        return error_redirect("Failed to store the uploaded file");
    }

    let output_name = output_file_name(&file_name, &upload_id, format);
    let request = ProcessRequest {
        input: upload_path.clone(),
        output: state.upload_dir.join(&output_name),
        strategy,
        format,
        api_key,
    };

    let orchestrator = state.orchestrator.clone();
    let result = tokio::task::spawn_blocking(move || orchestrator.process(&request)).await;

    if let Err(e) = tokio::fs::remove_file(&upload_path).await {
        tracing::warn!("Could not remove upload {}: {}", upload_path.display(), e);
    }

    match result {
        Ok(Ok(outcome)) => {
            if outcome.has_errors {
                tracing::warn!("{} finished with failed pages", output_name);
            }
            Redirect::to(&format!("/download/{}", urlencoding::encode(&output_name)))
                .into_response()
        }
        Ok(Err(e)) => error_redirect(&format!("Error processing PDF: {}", e)),
        Err(e) => {
            tracing::error!("Extraction task failed: {}", e);
            error_redirect("Error processing PDF: extraction task failed")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_extension() {
        assert!(has_pdf_extension("report.pdf"));
        assert!(has_pdf_extension("REPORT.PDF"));
        assert!(!has_pdf_extension("report.pdf.exe"));
        assert!(!has_pdf_extension("pdf"));
    }
}
