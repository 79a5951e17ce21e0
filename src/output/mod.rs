//! Output serialization.
//!
//! Layout depends on the strategy that produced the result:
//!
//! | Strategy    | txt                                    | docx                          |
//! |-------------|----------------------------------------|-------------------------------|
//! | DirectText  | page texts joined by a blank line      | paragraph per non-empty line  |
//! | Ocr         | headed pages with page-break separators| paragraph per non-empty line  |
//! | VisionModel | same as Ocr                            | paragraph per page + break    |

mod docx;

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::models::{ExtractionResult, ExtractionStrategy, OutputFormat, PageResult};

pub use docx::{document_xml, write_docx, Paragraph};

/// Separator between pages in headed plain-text output.
pub const PAGE_BREAK_MARKER: &str = "--- Page Break ---";

/// Errors from writing output artifacts.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("DOCX packaging failed: {0}")]
    Zip(#[from] zip::result::ZipError),
}

fn page_header(page: &PageResult) -> String {
    format!("--- Page {} ---\n{}", page.page_index, page.display_text())
}

/// Plain-text rendering of a result.
pub fn render_text(result: &ExtractionResult) -> String {
    match result.strategy {
        ExtractionStrategy::DirectText => result
            .pages
            .iter()
            .map(|p| p.display_text().into_owned())
            .collect::<Vec<_>>()
            .join("\n\n"),
        ExtractionStrategy::Ocr | ExtractionStrategy::VisionModel => result
            .pages
            .iter()
            .map(page_header)
            .collect::<Vec<_>>()
            .join(&format!("\n\n{}\n\n", PAGE_BREAK_MARKER)),
    }
}

fn non_empty_lines(text: &str) -> impl Iterator<Item = Paragraph> + '_ {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(Paragraph::new)
}

/// DOCX paragraphs for a result.
pub fn render_paragraphs(result: &ExtractionResult) -> Vec<Paragraph> {
    match result.strategy {
        ExtractionStrategy::DirectText => non_empty_lines(&render_text(result)).collect(),
        ExtractionStrategy::Ocr => result
            .pages
            .iter()
            .flat_map(|p| non_empty_lines(&page_header(p)).collect::<Vec<_>>())
            .collect(),
        ExtractionStrategy::VisionModel => result
            .pages
            .iter()
            .map(|p| Paragraph::with_page_break(p.display_text()))
            .collect(),
    }
}

/// Write `result` to `path` in `format`, creating parent directories.
///
/// The file is staged next to its destination and renamed into place, so a
/// failed write leaves nothing at `path`.
pub fn write_output(
    result: &ExtractionResult,
    format: OutputFormat,
    path: &Path,
) -> Result<(), OutputError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let staged = tempfile::Builder::new()
        .prefix(".lipikar-")
        .tempfile_in(parent)?;

    match format {
        OutputFormat::Txt => {
            let mut writer = BufWriter::new(staged.as_file());
            writer.write_all(render_text(result).as_bytes())?;
            writer.flush()?;
        }
        OutputFormat::Docx => {
            write_docx(BufWriter::new(staged.as_file()), &render_paragraphs(result))?
                .flush()?;
        }
    }

    staged.persist(path).map_err(|e| OutputError::Io(e.error))?;
    Ok(())
}
