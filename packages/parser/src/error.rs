//! Error types for the parser.
//!
//! Structural problems are fatal for the document they occur in and carry
//! enough context (law code, marker label, section number) to fix the source
//! data by hand. Tolerable noise never reaches this type.

use thiserror::Error;

/// Main error type for the parser library.
#[derive(Debug, Error)]
pub enum ParserError {
    /// The document contains no section (มาตรา) markers at all.
    #[error("Document {law_code} has no section markers")]
    NoSections { law_code: String },

    /// The upstream feed reported a document without sections.
    #[error("Document has no section data: {0}")]
    EmptyDocument(String),

    /// Parent markers and child groups disagree after the leading-chunk adjustment.
    #[error(
        "Inconsistent structure at level '{level}': {parents} parent markers but {children} child groups (first marker: {marker})"
    )]
    StructureMismatch {
        level: String,
        parents: usize,
        children: usize,
        marker: String,
    },

    /// A sub-index range whose endpoints name different main sections.
    #[error("Range endpoints disagree on the main section: '{start}' to '{end}'")]
    RangeMismatch { start: String, end: String },

    /// A structural error raised while building one document.
    #[error("Failed to parse document {law_code}: {source}")]
    Document {
        law_code: String,
        #[source]
        source: Box<ParserError>,
    },

    /// Section-type catalogue is unusable.
    #[error("Invalid section type catalogue: {0}")]
    InvalidSectionType(String),

    /// Parser configuration is unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML configuration error.
    #[error("YAML parsing failed: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl ParserError {
    /// Attach the document's law code to a structural error.
    #[must_use]
    pub fn in_document(self, law_code: impl Into<String>) -> Self {
        match self {
            // Already scoped, or already names the document.
            Self::Document { .. } | Self::NoSections { .. } => self,
            other => Self::Document {
                law_code: law_code.into(),
                source: Box::new(other),
            },
        }
    }
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;
