//! Text normalization utilities for raw section content.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

use crate::config::THAI_DIGITS;

/// Runs of horizontal whitespace (spaces, tabs, NBSP) inside a line.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static HORIZONTAL_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\S\n]+").expect("valid regex"));

/// Any whitespace run, newlines included.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ANY_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Convert Thai digits (๐-๙) to Arabic digits.
///
/// # Examples
/// ```
/// use lawtree_parser::text::thai_to_arabic;
///
/// assert_eq!(thai_to_arabic("มาตรา ๑๒/๑"), "มาตรา 12/1");
/// ```
#[must_use]
pub fn thai_to_arabic(text: &str) -> String {
    text.chars()
        .map(|c| {
            THAI_DIGITS
                .iter()
                .find(|(thai, _)| *thai == c)
                .map_or(c, |(_, arabic)| *arabic)
        })
        .collect()
}

/// Repair sara am (ำ) typed as nikhahit + sara aa (ํ + า).
///
/// Both spellings render identically but only the composed one matches
/// patterns such as "บทเฉพาะกาล" or "ต้องระวาง" literally.
#[must_use]
pub fn fix_sara_am(text: &str) -> String {
    text.replace("\u{0E4D}\u{0E32}", "\u{0E33}")
}

/// Collapse horizontal whitespace inside each line, trim each line and drop
/// trailing blank lines. Line structure is preserved.
#[must_use]
pub fn normalize_space(text: &str) -> String {
    let lines: Vec<String> = text
        .lines()
        .map(|line| HORIZONTAL_SPACE.replace_all(line, " ").trim().to_string())
        .collect();
    lines.join("\n").trim_end().to_string()
}

/// Collapse every whitespace run, newlines included, into one space.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    ANY_WHITESPACE.replace_all(text, " ").into_owned()
}

/// Normalize a raw field from the upstream feed.
///
/// Applies Unicode NFC, Thai digit conversion, sara am repair and space
/// normalization, in that order.
#[must_use]
pub fn normalize_text(text: &str) -> String {
    let composed: String = text.nfc().collect();
    normalize_space(&fix_sara_am(&thai_to_arabic(&composed)))
}

/// Remove every Thai character from `text`.
///
/// Used to derive ASCII file names from law codes.
#[must_use]
pub fn strip_thai(text: &str) -> String {
    text.chars()
        .filter(|c| !('\u{0E01}'..='\u{0E59}').contains(c))
        .collect()
}
