//! Extraction, detection and legacy conversion commands.

use std::path::{Path, PathBuf};

use console::style;

use crate::config::ExtractorConfig;
use crate::detect::{detect_from_image, detect_from_text};
use crate::extract::Orchestrator;
use crate::legacy;
use crate::models::{ExtractionStrategy, OutputFormat, ProcessRequest, ScriptCategory};
use crate::ocr::TesseractEngine;
use crate::pdf::{PageRange, PdftotextReader, TextLayerReader};

/// Default output path: the input with the format's extension.
fn default_output(input: &Path, format: OutputFormat) -> PathBuf {
    input.with_extension(format.extension())
}

/// Extract text from a PDF with the chosen strategy.
pub async fn cmd_extract(
    settings: &ExtractorConfig,
    input: PathBuf,
    output: Option<PathBuf>,
    strategy: ExtractionStrategy,
    format: OutputFormat,
    api_key: Option<String>,
) -> anyhow::Result<()> {
    let output = output.unwrap_or_else(|| default_output(&input, format));
    let request = ProcessRequest {
        input,
        output,
        strategy,
        format,
        api_key,
    };

    println!(
        "{} Extracting {} ({})",
        style("→").cyan(),
        request.input.display(),
        strategy
    );

    let orchestrator = Orchestrator::new(settings);
    let outcome =
        tokio::task::spawn_blocking(move || orchestrator.process(&request)).await??;

    if outcome.has_errors {
        println!(
            "{} Some pages could not be extracted; see the markers in the output",
            style("!").yellow()
        );
    }
    if let Some(script) = outcome.script {
        println!("  Script: {}", script);
    }
    println!(
        "{} Saved {} pages to {}",
        style("✓").green(),
        outcome.page_count,
        outcome.output_path.display()
    );
    Ok(())
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// Detect the script of a PDF's text layer or of an image.
pub async fn cmd_detect(settings: &ExtractorConfig, input: PathBuf) -> anyhow::Result<()> {
    if !input.is_file() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    let settings = settings.clone();
    let detect = move || -> anyhow::Result<(ScriptCategory, bool)> {
        if is_pdf(&input) {
            let reader = PdftotextReader::new(&settings.text_reader_binary);
            let sample = reader
                .read_pages(&input, Some(PageRange::new(1, 3)))?
                .join("\n");
            Ok((detect_from_text(&sample), legacy::looks_legacy(&sample)))
        } else {
            let engine = TesseractEngine::with_binary(&settings.ocr_binary);
            let script = detect_from_image(&engine, &input, &settings.language_packs);
            Ok((script, false))
        }
    };
    let (script, legacy) = tokio::task::spawn_blocking(detect).await??;

    println!("{} Script: {}", style("✓").green(), style(script).bold());
    if legacy {
        println!("  Text layer uses the legacy (Bijoy) encoding");
    }
    Ok(())
}

/// Convert a legacy-encoded text file to Unicode.
pub fn cmd_convert_legacy(input: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(input)?;
    let converted = legacy::convert(&text)?;

    match output {
        Some(path) => {
            std::fs::write(path, &converted)?;
            println!("{} Wrote {}", style("✓").green(), path.display());
        }
        None => print!("{}", converted),
    }
    Ok(())
}
