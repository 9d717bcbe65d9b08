//! Configuration constants, pattern tables and YAML configuration for the parser.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::splitting::{HierarchyRegistry, SectionRole};

/// Name of the preface (คำปรารภ) section type.
pub const PREFACE_NAME: &str = "คำปรารภ";

/// Name of the section (มาตรา) section type.
pub const SECTION_NAME: &str = "มาตรา";

/// Name of the transitional provision (บทเฉพาะกาล) section type.
pub const PROVISION_NAME: &str = "บทเฉพาะกาล";

/// Name of the royal countersignature (ผู้รับสนองพระบรมราชโองการ) section type.
pub const RESPONDENT_NAME: &str = "ผู้รับสนองพระบรมราชโองการ";

/// Name of the footnote (หมายเหตุ) section type.
pub const FOOTNOTE_NAME: &str = "หมายเหตุ";

/// Name of the miscellaneous (เบ็ดเตล็ด) section type.
///
/// Also the fallback group name when miscellaneous titles share no substring.
pub const MISCELLANEOUS_NAME: &str = "เบ็ดเตล็ด";

/// Section type assigned to nodes produced by the subsection splitter.
pub const SUBSECTION_NAME: &str = "อนุมาตรา";

/// Conjunction word ("or") stripped from the end of a subsection detail.
pub const TRAILING_OR: &str = "หรือ";

/// Default section-type catalogue of the upstream feed, in hierarchy order.
///
/// Entries whose name is not one of the special roles are hierarchy levels,
/// outermost first: บรรพ (book), ภาค (part), ลักษณะ (title), หมวด (chapter),
/// ส่วน (division).
pub const DEFAULT_SECTION_TYPES: &[(&str, &str)] = &[
    ("3", PREFACE_NAME),
    ("4", SECTION_NAME),
    ("5", "บรรพ"),
    ("6", "ภาค"),
    ("7", "ลักษณะ"),
    ("8", "หมวด"),
    ("9", "ส่วน"),
    ("13", PROVISION_NAME),
    ("14", RESPONDENT_NAME),
    ("15", FOOTNOTE_NAME),
    ("16", MISCELLANEOUS_NAME),
];

/// Thai ordinal suffixes marking an inserted variant of a section number
/// (e.g. "มาตรา 5 ทวิ" is the section inserted after section 5).
pub const ORDINAL_WORDS: &[&str] = &[
    "ทวิ",
    "ตรี",
    "จัตวา",
    "เบญจ",
    "ฉัพพีสติ",
    "ฉ",
    "สัตตรส",
    "สัตต",
    "อัฏฐารส",
    "อัฏฐ",
    "นว",
    "ทศ",
    "เอกาทศ",
    "ทวาทศ",
    "เตรส",
    "จตุทศ",
    "ปัณรส",
    "โสฬส",
    "เอกูนวีสติ",
    "วีสติ",
    "เอกวีสติ",
    "ทวาวีสติ",
    "เตวีสติ",
    "จตุวีสติ",
    "ปัญจวีสติ",
];

/// Thai digit to Arabic digit table.
pub const THAI_DIGITS: &[(char, char)] = &[
    ('๐', '0'),
    ('๑', '1'),
    ('๒', '2'),
    ('๓', '3'),
    ('๔', '4'),
    ('๕', '5'),
    ('๖', '6'),
    ('๗', '7'),
    ('๘', '8'),
    ('๙', '9'),
];

/// Widest citation range expanded section by section.
pub const MAX_RANGE_SPAN: u32 = 1000;

/// Default output directory for parsed trees.
pub const DEFAULT_OUTPUT_DIR: &str = "data/lawtree";

/// Number of content characters shown in a node summary.
pub const CONTENT_PREVIEW_CHARS: usize = 30;

/// Returns true when `word` is one of the [`ORDINAL_WORDS`].
#[must_use]
pub fn is_ordinal_word(word: &str) -> bool {
    ORDINAL_WORDS.contains(&word)
}

/// One entry of the section-type catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionTypeEntry {
    /// Type id as delivered by the feed (e.g. "4").
    pub id: String,

    /// Thai name of the type (e.g. "มาตรา").
    pub name: String,

    /// Explicit role; inferred from `name` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<SectionRole>,
}

impl SectionTypeEntry {
    /// Create an entry whose role is inferred from its name.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role: None,
        }
    }

    /// Role of this entry, explicit or inferred.
    #[must_use]
    pub fn resolved_role(&self) -> SectionRole {
        self.role.unwrap_or_else(|| SectionRole::from_name(&self.name))
    }
}

fn default_section_types() -> Vec<SectionTypeEntry> {
    DEFAULT_SECTION_TYPES
        .iter()
        .map(|(id, name)| SectionTypeEntry::new(*id, *name))
        .collect()
}

/// A document listed in the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentEntry {
    /// Path of the raw JSON dump, relative to the configuration file.
    pub path: PathBuf,

    /// Optional human title, informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Parser configuration, usually loaded from YAML.
///
/// ```yaml
/// deepest_subsection: true
/// documents:
///   - path: raw/civil.json
///     title: ประมวลกฎหมายแพ่งและพาณิชย์
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Split sections into subsection (อนุมาตรา) children.
    #[serde(default)]
    pub deepest_subsection: bool,

    /// Documents to parse.
    #[serde(default)]
    pub documents: Vec<DocumentEntry>,

    /// Section-type catalogue, in hierarchy order.
    #[serde(default = "default_section_types")]
    pub section_types: Vec<SectionTypeEntry>,

    /// Output directory for parsed trees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            deepest_subsection: false,
            documents: Vec::new(),
            section_types: default_section_types(),
            output_dir: None,
        }
    }
}

impl ParserConfig {
    /// Parse and validate a configuration from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    ///
    /// Relative document paths are resolved against the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        let mut config = Self::from_yaml_str(&yaml)?;

        if let Some(base) = path.parent() {
            for document in &mut config.documents {
                if document.path.is_relative() {
                    document.path = base.join(&document.path);
                }
            }
        }

        tracing::debug!(
            path = %path.display(),
            documents = config.documents.len(),
            "Loaded parser configuration"
        );
        Ok(config)
    }

    /// Check that the section-type catalogue can drive the parser.
    pub fn validate(&self) -> Result<()> {
        self.hierarchy().map(|_| ())
    }

    /// Build the hierarchy registry described by this configuration.
    pub fn hierarchy(&self) -> Result<HierarchyRegistry> {
        HierarchyRegistry::from_entries(&self.section_types)
    }

    /// Output directory, falling back to [`DEFAULT_OUTPUT_DIR`].
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
    }
}
