//! Subsection (อนุมาตรา) splitting of section bodies.
//!
//! A section body such as
//!
//! ```text
//! มาตรา 5 ผู้ใดกระทำการดังต่อไปนี้
//! (1) ข้อหนึ่ง
//! (ก) ข้อย่อย
//! (2) ข้อสอง หรือ
//! ต้องระวางโทษปรับ
//! ```
//!
//! is segmented into an intro (lines before the first numbered marker),
//! numbered subsections with their nested lettered sub-clauses, and an
//! outro (plain lines after the last subsection). Every subsection is then
//! rebuilt as a standalone body carrying the shared intro and outro.

use regex::Regex;
use std::sync::LazyLock;

use crate::config::{SUBSECTION_NAME, TRAILING_OR};

/// Numbered subsection marker at line start, e.g. `(1)` or `(3/1)`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SUBSECTION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(\d+(?:/\d+)?\)").expect("valid regex"));

/// Lettered sub-clause marker at line start, e.g. `(ก)`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SUBCLAUSE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\([ก-๙]+\)").expect("valid regex"));

/// One reconstructed subsection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subsection {
    /// Marker of the subsection, parentheses included (e.g. `(1)`).
    pub index: String,

    /// Standalone body: header, intro, own detail and shared outro, one per line.
    pub body: String,
}

impl Subsection {
    /// Body split into lines.
    #[must_use]
    pub fn clauses(&self) -> Vec<String> {
        self.body.lines().map(str::to_string).collect()
    }
}

/// A numbered item with its detail and nested sub-clauses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Item {
    marker: String,
    lines: Vec<String>,
}

/// Segmented section body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Segments {
    intro: Vec<String>,
    items: Vec<Item>,
    outro: Vec<String>,
}

impl Segments {
    fn parse(text: &str) -> Self {
        let mut segments = Self::default();

        for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
            if let Some(marker) = SUBSECTION_MARKER.find(line) {
                // Plain lines between two subsections continue the earlier one.
                segments.flush_outro();
                segments.items.push(Item {
                    marker: marker.as_str().to_string(),
                    lines: vec![line.to_string()],
                });
            } else if segments.items.is_empty() {
                segments.intro.push(line.to_string());
            } else if SUBCLAUSE_MARKER.is_match(line) {
                if let Some(item) = segments.items.last_mut() {
                    item.lines.push(line.to_string());
                }
            } else {
                segments.outro.push(line.to_string());
            }
        }

        segments
    }

    fn flush_outro(&mut self) {
        if let Some(item) = self.items.last_mut() {
            item.lines.append(&mut self.outro);
        }
    }
}

/// Split a section body into subsections.
///
/// # Arguments
/// * `text` - Raw section content
/// * `label` - Section label as it appears on the first line (e.g. "มาตรา 5")
///
/// # Returns
/// `None` when the body has no numbered subsection marker, otherwise one
/// [`Subsection`] per marker line, in order.
#[must_use]
pub fn split_subsections(text: &str, label: &str) -> Option<Vec<Subsection>> {
    let segments = Segments::parse(text);
    if segments.items.is_empty() {
        return None;
    }

    Some(
        segments
            .items
            .iter()
            .map(|item| rebuild(&segments, item, label))
            .collect(),
    )
}

fn rebuild(segments: &Segments, item: &Item, label: &str) -> Subsection {
    let index = item.marker.clone();

    let joined = item.lines.join("\n");
    let detail = joined[item.marker.len()..].trim();
    let detail = detail.strip_suffix(TRAILING_OR).unwrap_or(detail).trim();

    let mut lines: Vec<String> = Vec::new();
    if let Some((first, rest)) = segments.intro.split_first() {
        let header = if label.is_empty() {
            first.clone()
        } else {
            first.replacen(label, &format!("{label} {SUBSECTION_NAME} {index}"), 1)
        };
        lines.push(header);
        lines.extend(rest.iter().cloned());
    }
    if !detail.is_empty() {
        lines.push(detail.to_string());
    }
    lines.extend(segments.outro.iter().cloned());

    Subsection {
        index,
        body: lines.join("\n"),
    }
}
