//! Helper functions for handlers.

use std::path::{Path, PathBuf};

use axum::response::{IntoResponse, Redirect, Response};
use uuid::Uuid;

use crate::models::OutputFormat;

/// Redirect back to the form with an error message.
pub fn error_redirect(message: &str) -> Response {
    Redirect::to(&format!("/?error={}", urlencoding::encode(message))).into_response()
}

/// Result file name: the upload's stem made path-safe, plus a short id so
/// concurrent uploads of the same file never collide.
pub fn output_file_name(upload_name: &str, id: &Uuid, format: OutputFormat) -> String {
    let base = upload_name.rsplit(['/', '\\']).next().unwrap_or(upload_name);
    let stem = base.rsplit_once('.').map(|(s, _)| s).unwrap_or(base);
    let safe: String = stem
        .chars()
        .map(|c| {
            let keep = c.is_ascii_alphanumeric()
                || c == '-'
                || c == '_'
                || (!c.is_ascii() && !c.is_whitespace() && !c.is_control());
            if keep {
                c
            } else {
                '_'
            }
        })
        .collect();
    let safe = safe.trim_matches('_');
    let safe = if safe.is_empty() { "document" } else { safe };

    let short_id = id.simple().to_string();
    format!("{}-{}.{}", safe, &short_id[..8], format.extension())
}

/// Resolve a file name inside the upload directory, rejecting anything
/// that escapes it.
pub fn resolve_upload(upload_dir: &Path, filename: &str) -> Option<PathBuf> {
    if filename.contains("..") || filename.starts_with('/') || filename.contains('\\') {
        return None;
    }

    let canonical_dir = upload_dir.canonicalize().ok()?;
    let canonical_file = canonical_dir.join(filename).canonicalize().ok()?;

    if !canonical_file.starts_with(&canonical_dir) || !canonical_file.is_file() {
        return None;
    }
    Some(canonical_file)
}

/// `Content-Disposition` value for an attachment. Non-ASCII names go in
/// the RFC 5987 `filename*` parameter.
pub fn content_disposition(filename: &str) -> String {
    let ascii: String = filename
        .chars()
        .map(|c| {
            if (c.is_ascii_graphic() && c != '"') || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        ascii,
        urlencoding::encode(filename)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_file_name() {
        let id = Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        assert_eq!(
            output_file_name("Annual Report.pdf", &id, OutputFormat::Docx),
            "Annual_Report-67e55044.docx"
        );
        assert_eq!(
            output_file_name("../../etc/passwd.pdf", &id, OutputFormat::Txt),
            "passwd-67e55044.txt"
        );
        assert_eq!(
            output_file_name("বার্ষিক.pdf", &id, OutputFormat::Txt),
            "বার্ষিক-67e55044.txt"
        );
        assert_eq!(
            output_file_name("###.pdf", &id, OutputFormat::Txt),
            "document-67e55044.txt"
        );
    }

    #[test]
    fn test_resolve_upload_rejects_escape() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("out.txt"), "x").unwrap();

        assert!(resolve_upload(dir.path(), "out.txt").is_some());
        assert!(resolve_upload(dir.path(), "../out.txt").is_none());
        assert!(resolve_upload(dir.path(), "/etc/passwd").is_none());
        assert!(resolve_upload(dir.path(), "missing.txt").is_none());
    }

    #[test]
    fn test_content_disposition() {
        assert_eq!(
            content_disposition("a b.txt"),
            "attachment; filename=\"a b.txt\"; filename*=UTF-8''a%20b.txt"
        );
        assert!(content_disposition("বাংলা.txt").starts_with("attachment; filename=\"_____.txt\""));
    }
}
