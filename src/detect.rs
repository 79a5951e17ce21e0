//! Script detection for text samples and page images.

use std::path::Path;

use tracing::{debug, warn};

use crate::legacy::{count_markers, is_bangla};
use crate::models::ScriptCategory;
use crate::ocr::{LanguagePacks, OcrEngine, PSM_SINGLE_BLOCK};

/// Bangla codepoints above this count settle a sample as Bangla.
const BANGLA_THRESHOLD: usize = 5;
/// Legacy marker count above this settles a sample as (legacy) Bangla.
const MARKER_THRESHOLD: usize = 10;

/// Classify a text sample. Never returns `Mixed`.
pub fn detect_from_text(sample: &str) -> ScriptCategory {
    let bangla = sample.chars().filter(|c| is_bangla(*c)).count();
    let markers = count_markers(sample);

    if bangla > BANGLA_THRESHOLD || markers > MARKER_THRESHOLD {
        return ScriptCategory::Bangla;
    }

    let latin = sample.chars().filter(|c| c.is_ascii_alphabetic()).count();
    if latin > bangla + markers {
        ScriptCategory::English
    } else {
        ScriptCategory::Bangla
    }
}

/// Map an orientation/script detection report to a script, if it names one.
pub fn script_from_osd(report: &str) -> Option<ScriptCategory> {
    if report.contains("Bengali") {
        Some(ScriptCategory::Bangla)
    } else if report.contains("Latin") {
        Some(ScriptCategory::English)
    } else {
        None
    }
}

/// Classify a page image, falling back to comparing two OCR passes when
/// script detection fails or is inconclusive.
pub fn detect_from_image(
    engine: &dyn OcrEngine,
    image: &Path,
    packs: &LanguagePacks,
) -> ScriptCategory {
    match engine.detect_script(image) {
        Ok(report) => {
            if let Some(script) = script_from_osd(&report) {
                debug!("OSD reports {} for {}", script, image.display());
                return script;
            }
            debug!("OSD inconclusive for {}", image.display());
        }
        Err(e) => debug!("OSD failed for {}: {}", image.display(), e),
    }

    let english = engine
        .recognize(image, &packs.english, PSM_SINGLE_BLOCK)
        .map(|t| t.chars().filter(|c| c.is_ascii_alphabetic()).count());
    let bangla = engine
        .recognize(image, &packs.bangla, PSM_SINGLE_BLOCK)
        .map(|t| t.chars().filter(|c| is_bangla(*c)).count());

    match (english, bangla) {
        (Ok(english), Ok(bangla)) => {
            debug!("Fallback counts: english={} bangla={}", english, bangla);
            if bangla > english {
                ScriptCategory::Bangla
            } else if english > bangla {
                ScriptCategory::English
            } else {
                ScriptCategory::Mixed
            }
        }
        (Err(e), _) | (_, Err(e)) => {
            warn!("Script detection failed for {}: {}", image.display(), e);
            ScriptCategory::Mixed
        }
    }
}
