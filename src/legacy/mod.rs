//! Bijoy legacy encoding to Unicode conversion.
//!
//! Bijoy-encoded PDFs store Bangla as ASCII and Latin-1 code points that a
//! custom font draws as Bangla glyphs. Reading the text layer therefore
//! yields strings like `Avwg evsjvq Mvb MvB` instead of `আমি বাংলায় গান গাই`.
//! Conversion is a longest-match glyph remap followed by two reordering
//! passes, because the encoding stores glyphs in visual order:
//!
//! - pre-base vowel signs (ি ে ৈ) come *before* the consonant they follow
//!   phonetically;
//! - reph (র্) comes *after* the consonant cluster it precedes.

mod table;

use std::collections::HashMap;
use std::sync::OnceLock;

use thiserror::Error;

use table::{GLYPHS, MAX_KEY_CHARS, REPH_MARK};

/// Characters the legacy encoding repurposes that rarely appear in real
/// Latin text. Used by script detection.
pub const LEGACY_MARKERS: &[char] = &['`', '~', '©', 'Ö', '¨', '«'];

/// Glyphs that only show up in a legacy-encoded text layer. Curly quotes,
/// dashes and ellipses are left out: English PDFs use them too.
const LEGACY_GLYPHS: &[char] = &[
    '`', '~', '©', 'Ö', '¨', '«', '‡', '†', '‰', 'ˆ', 'Š', '„', '¯', '¤', 'š', '›', 'ª', '¡',
    '¦', 'Ÿ', 'œ', '¥', 'ø', '¬', '°', '³', 'µ', 'ÿ', 'Ë', 'Î', '×', 'Ø', 'ß', 'Ò', 'Ó', 'Ô',
    'Õ',
];

const HASANTA: char = '\u{09CD}';
const AA_SIGN: char = '\u{09BE}';
const AU_LENGTH_MARK: char = '\u{09D7}';
const I_SIGN: char = '\u{09BF}';
const E_SIGN: char = '\u{09C7}';
const AI_SIGN: char = '\u{09C8}';
const O_SIGN: char = '\u{09CB}';
const AU_SIGN: char = '\u{09CC}';

/// Errors from legacy conversion.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodingError {
    #[error("input contains reserved codepoint U+{codepoint:04X} at char offset {offset}")]
    ReservedCodepoint { codepoint: u32, offset: usize },
}

/// Whether `c` falls in the Bangla Unicode block.
pub fn is_bangla(c: char) -> bool {
    ('\u{0980}'..='\u{09FF}').contains(&c)
}

/// Count characters from the legacy marker set.
pub fn count_markers(text: &str) -> usize {
    text.chars().filter(|c| LEGACY_MARKERS.contains(c)).count()
}

/// Split `text` into alternating whitespace and non-whitespace runs.
fn split_runs(text: &str) -> Vec<&str> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut in_space = None;
    for (i, c) in text.char_indices() {
        let space = c.is_whitespace();
        if in_space.is_some_and(|s| s != space) {
            runs.push(&text[start..i]);
            start = i;
        }
        in_space = Some(space);
    }
    if start < text.len() {
        runs.push(&text[start..]);
    }
    runs
}

/// Whether the text looks like a legacy-encoded text layer: words carrying
/// legacy-only glyphs (and no Unicode Bangla) are at least as common as
/// words written in Unicode Bangla.
pub fn looks_legacy(text: &str) -> bool {
    let mut legacy_words = 0usize;
    let mut bangla_words = 0usize;
    for run in text.split_whitespace() {
        if run.chars().any(is_bangla) {
            bangla_words += 1;
        } else if run.chars().any(|c| LEGACY_GLYPHS.contains(&c)) {
            legacy_words += 1;
        }
    }
    legacy_words > 0 && legacy_words >= bangla_words
}

/// Convert legacy-encoded text to Unicode Bangla.
///
/// Text that does not look legacy-encoded is returned unchanged. Otherwise
/// every whitespace-delimited word is converted except words that already
/// contain Unicode Bangla, which pass through as they are.
pub fn convert(text: &str) -> Result<String, EncodingError> {
    if !looks_legacy(text) {
        return Ok(text.to_string());
    }

    if let Some(offset) = text.chars().position(|c| c == REPH_MARK) {
        return Err(EncodingError::ReservedCodepoint {
            codepoint: REPH_MARK as u32,
            offset,
        });
    }

    let mut out = String::with_capacity(text.len() * 2);
    for run in split_runs(text) {
        if run.starts_with(char::is_whitespace) || run.chars().any(is_bangla) {
            out.push_str(run);
        } else {
            convert_word(run, &mut out);
        }
    }
    Ok(out)
}

fn convert_word(word: &str, out: &mut String) {
    let mut chars = remap(word);
    place_prebase_signs(&mut chars);
    place_reph(&mut chars);

    for c in chars {
        if c == REPH_MARK {
            out.push('র');
            out.push(HASANTA);
        } else {
            out.push(c);
        }
    }
}

fn glyph_map() -> &'static HashMap<&'static str, &'static str> {
    static MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    MAP.get_or_init(|| GLYPHS.iter().copied().collect())
}

/// Longest-match replacement of legacy sequences. Unknown characters pass
/// through untouched.
fn remap(text: &str) -> Vec<char> {
    let map = glyph_map();
    let src: Vec<char> = text.chars().collect();
    let mut out = Vec::with_capacity(src.len());
    let mut key = String::with_capacity(MAX_KEY_CHARS * 4);

    let mut i = 0;
    while i < src.len() {
        let mut matched = false;
        for len in (1..=MAX_KEY_CHARS.min(src.len() - i)).rev() {
            key.clear();
            key.extend(&src[i..i + len]);
            if let Some(replacement) = map.get(key.as_str()) {
                out.extend(replacement.chars());
                i += len;
                matched = true;
                break;
            }
        }
        if !matched {
            out.push(src[i]);
            i += 1;
        }
    }
    out
}

fn is_consonant(c: char) -> bool {
    matches!(c, '\u{0995}'..='\u{09B9}' | '\u{09DC}' | '\u{09DD}' | '\u{09DF}')
}

fn is_vowel_sign(c: char) -> bool {
    matches!(c, '\u{09BE}'..='\u{09CC}' | '\u{09D7}')
}

/// End (exclusive) of the consonant cluster starting at `start`:
/// `C (্ C)*`.
fn cluster_end(chars: &[char], start: usize) -> usize {
    let mut end = start + 1;
    while end + 1 < chars.len() && chars[end] == HASANTA && is_consonant(chars[end + 1]) {
        end += 2;
    }
    end
}

/// Move ি ে ৈ from before their cluster to after it, and merge split
/// vowel signs (ে + া → ো, ে + ৗ → ৌ).
fn place_prebase_signs(chars: &mut Vec<char>) {
    let mut i = 0;
    while i < chars.len() {
        let sign = chars[i];
        let is_prebase = matches!(sign, I_SIGN | E_SIGN | AI_SIGN);
        if !is_prebase || i + 1 >= chars.len() || !is_consonant(chars[i + 1]) {
            i += 1;
            continue;
        }

        let end = cluster_end(chars, i + 1);
        chars[i..end].rotate_left(1);
        let sign_pos = end - 1;

        if sign == E_SIGN && sign_pos + 1 < chars.len() {
            match chars[sign_pos + 1] {
                AA_SIGN => {
                    chars[sign_pos] = O_SIGN;
                    chars.remove(sign_pos + 1);
                }
                AU_LENGTH_MARK => {
                    chars[sign_pos] = AU_SIGN;
                    chars.remove(sign_pos + 1);
                }
                _ => {}
            }
        }
        i = sign_pos + 1;
    }
}

/// Move each reph mark in front of the consonant cluster it trails. A reph
/// with no cluster before it stays where it is.
fn place_reph(chars: &mut Vec<char>) {
    let mut i = 0;
    while i < chars.len() {
        if chars[i] != REPH_MARK {
            i += 1;
            continue;
        }

        let mut k = i;
        while k > 0 && is_vowel_sign(chars[k - 1]) {
            k -= 1;
        }
        if k == 0 || !is_consonant(chars[k - 1]) {
            i += 1;
            continue;
        }
        k -= 1;
        while k >= 2 && chars[k - 1] == HASANTA && is_consonant(chars[k - 2]) {
            k -= 2;
        }

        chars.remove(i);
        chars.insert(k, REPH_MARK);
        i += 1;
    }
}
