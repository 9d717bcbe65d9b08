//! Reading raw document dumps from the upstream law feed.
//!
//! A dump is either the API response (`{"respBody": {...}}`) or the body
//! object on its own. Text fields are normalised on the way in so the
//! builders only ever see Arabic digits and collapsed spaces.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{ParserError, Result};
use crate::text::normalize_text;
use crate::types::{DocumentInfo, LawDocument, SectionRecord};

/// Wrapper key of the upstream API response.
const RESPONSE_BODY_KEY: &str = "respBody";

#[derive(Debug, Deserialize)]
struct RawBody {
    #[serde(rename = "hasSection", default = "default_has_section")]
    has_section: bool,

    #[serde(rename = "lawInfo")]
    info: DocumentInfo,

    #[serde(rename = "lawSections", default)]
    sections: Vec<SectionRecord>,
}

fn default_has_section() -> bool {
    true
}

/// Read and normalise one document dump from disk.
///
/// # Errors
/// Returns an error if the file cannot be read, is not a document dump, or
/// reports no sections.
pub fn read_document(path: &Path) -> Result<LawDocument> {
    let json = std::fs::read_to_string(path)?;
    let document = parse_document_json(&json).map_err(|e| match e {
        ParserError::EmptyDocument(_) => ParserError::EmptyDocument(path.display().to_string()),
        other => other,
    })?;

    tracing::debug!(
        path = %path.display(),
        law_code = %document.info.law_code,
        sections = document.sections.len(),
        "Read document"
    );
    Ok(document)
}

/// Parse and normalise one document dump.
///
/// # Errors
/// * [`ParserError::Json`] when the text is not a document dump
/// * [`ParserError::EmptyDocument`] when the feed reports `hasSection: false`
pub fn parse_document_json(json: &str) -> Result<LawDocument> {
    let mut value: Value = serde_json::from_str(json)?;
    if let Some(body) = value.get_mut(RESPONSE_BODY_KEY) {
        value = body.take();
    }

    let raw: RawBody = serde_json::from_value(value)?;
    if !raw.has_section {
        return Err(ParserError::EmptyDocument(raw.info.law_code));
    }

    Ok(normalize_document(raw.info, raw.sections))
}

/// Normalise the header and every record's text fields.
#[must_use]
pub fn normalize_document(mut info: DocumentInfo, sections: Vec<SectionRecord>) -> LawDocument {
    info.name_th = normalize_text(&info.name_th);
    info.name_en = normalize_text(&info.name_en);
    info.normalize();

    let sections = sections
        .into_iter()
        .map(|mut record| {
            record.type_id = record.type_id.trim().to_string();
            record.label = normalize_text(&record.label);
            record.number = normalize_text(&record.number);
            record.content = normalize_text(&record.content);
            record.name = record.name.as_deref().map(normalize_text);
            record
        })
        .collect();

    LawDocument::new(info, sections)
}
