//! Core input types for the parser.
//!
//! These types describe one document as delivered by the upstream law
//! feed: a header with the law's names and code, and an ordered list of
//! flat section records.

use serde::{Deserialize, Deserializer, Serialize};

/// Types of Thai legislation, detected from the law's Thai name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LawType {
    /// Constitution (รัฐธรรมนูญ).
    Constitution,

    /// Organic act on the constitution (พระราชบัญญัติประกอบรัฐธรรมนูญ).
    OrganicAct,

    /// Act of parliament (พระราชบัญญัติ).
    Act,

    /// Emergency decree (พระราชกำหนด).
    EmergencyDecree,

    /// Code (ประมวลกฎหมาย).
    Code,

    /// Palace law (กฎมณเฑียรบาล).
    PalaceLaw,

    /// Royal command (พระบรมราชโองการ).
    RoyalCommand,

    /// Royal decree (พระราชกฤษฎีกา).
    RoyalDecree,

    /// Ministerial regulation (กฎกระทรวง).
    MinisterialRegulation,
}

impl LawType {
    /// Every law type, in detection order.
    pub const ALL: [Self; 9] = [
        Self::Constitution,
        Self::OrganicAct,
        Self::Act,
        Self::EmergencyDecree,
        Self::Code,
        Self::PalaceLaw,
        Self::RoyalCommand,
        Self::RoyalDecree,
        Self::MinisterialRegulation,
    ];

    /// Thai name of the law type, as written in law titles.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Constitution => "รัฐธรรมนูญ",
            Self::OrganicAct => "พระราชบัญญัติประกอบรัฐธรรมนูญ",
            Self::Act => "พระราชบัญญัติ",
            Self::EmergencyDecree => "พระราชกำหนด",
            Self::Code => "ประมวลกฎหมาย",
            Self::PalaceLaw => "กฎมณเฑียรบาล",
            Self::RoyalCommand => "พระบรมราชโองการ",
            Self::RoyalDecree => "พระราชกฤษฎีกา",
            Self::MinisterialRegulation => "กฎกระทรวง",
        }
    }

    /// Detect the law type from a Thai law name.
    ///
    /// Checks every type in [`LawType::ALL`] order and keeps the last one
    /// contained in the name. An act enacting a code is reported as a code.
    ///
    /// # Examples
    /// ```
    /// use lawtree_parser::types::LawType;
    ///
    /// assert_eq!(
    ///     LawType::detect("พระราชบัญญัติคุ้มครองผู้บริโภค พ.ศ. 2522"),
    ///     Some(LawType::Act)
    /// );
    /// assert_eq!(LawType::detect("ประกาศ"), None);
    /// ```
    #[must_use]
    pub fn detect(name_th: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .rev()
            .find(|law_type| name_th.contains(law_type.as_str()))
    }
}

/// Upstream ids come as strings or bare integers, sometimes null.
#[derive(Deserialize)]
#[serde(untagged)]
enum LooseText {
    Text(String),
    Integer(i64),
}

impl From<LooseText> for String {
    fn from(value: LooseText) -> Self {
        match value {
            LooseText::Text(text) => text,
            LooseText::Integer(number) => number.to_string(),
        }
    }
}

pub(crate) fn loose_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<LooseText>::deserialize(deserializer)?
        .map(String::from)
        .unwrap_or_default())
}

pub(crate) fn loose_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<LooseText>::deserialize(deserializer)?.map(String::from))
}

/// One flat section record of a document, in reading order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRecord {
    /// Section-type id (e.g. "4" for มาตรา, "8" for หมวด).
    #[serde(alias = "sectionTypeId", deserialize_with = "loose_string")]
    pub type_id: String,

    /// Source section id.
    #[serde(
        default,
        alias = "sectionId",
        deserialize_with = "loose_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    /// Marker label (e.g. "มาตรา 5", "หมวด 1").
    #[serde(default, alias = "sectionLabel", deserialize_with = "loose_string")]
    pub label: String,

    /// Section number (e.g. "5", "10/1").
    #[serde(default, alias = "sectionNo", deserialize_with = "loose_string")]
    pub number: String,

    /// Raw text, label included.
    #[serde(default, alias = "sectionContent", deserialize_with = "loose_string")]
    pub content: String,

    /// Title carried by group markers.
    #[serde(
        default,
        alias = "sectionName",
        deserialize_with = "loose_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
}

impl SectionRecord {
    /// Create a new section record.
    #[must_use]
    pub fn new(
        type_id: impl Into<String>,
        label: impl Into<String>,
        number: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            type_id: type_id.into(),
            id: None,
            label: label.into(),
            number: number.into(),
            content: content.into(),
            name: None,
        }
    }

    /// Set the source section id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the group title.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Title used for miscellaneous-group naming: the record's name, else its content.
    #[must_use]
    pub fn title(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.content)
    }
}

/// Document header: names, code and type of a law.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInfo {
    /// Thai name.
    #[serde(alias = "lawNameTh", deserialize_with = "loose_string")]
    pub name_th: String,

    /// English name.
    #[serde(default, alias = "lawNameEn", deserialize_with = "loose_string")]
    pub name_en: String,

    /// Law code assigned by the upstream feed.
    #[serde(default, alias = "lawCode", deserialize_with = "loose_string")]
    pub law_code: String,

    /// Thai law type; detected from `name_th` when empty.
    #[serde(default, alias = "lawType", deserialize_with = "loose_string")]
    pub law_type: String,
}

impl DocumentInfo {
    /// Create a document header, detecting the law type from the Thai name.
    #[must_use]
    pub fn new(
        name_th: impl Into<String>,
        name_en: impl Into<String>,
        law_code: impl Into<String>,
    ) -> Self {
        let mut info = Self {
            name_th: name_th.into(),
            name_en: name_en.into(),
            law_code: law_code.into(),
            law_type: String::new(),
        };
        info.normalize();
        info
    }

    /// Set the law type explicitly.
    #[must_use]
    pub fn with_law_type(mut self, law_type: impl Into<String>) -> Self {
        self.law_type = law_type.into().trim().to_string();
        self
    }

    /// Trim every field and fill an empty law type by detection.
    pub fn normalize(&mut self) {
        self.name_th = self.name_th.trim().to_string();
        self.name_en = self.name_en.trim().to_string();
        self.law_code = self.law_code.trim().to_string();
        self.law_type = self.law_type.trim().to_string();
        if self.law_type.is_empty() {
            if let Some(law_type) = LawType::detect(&self.name_th) {
                self.law_type = law_type.as_str().to_string();
            }
        }
    }
}

/// A complete input document: header plus ordered section records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LawDocument {
    /// Document header.
    pub info: DocumentInfo,

    /// Section records in reading order.
    pub sections: Vec<SectionRecord>,
}

impl LawDocument {
    /// Create a new document.
    #[must_use]
    pub fn new(info: DocumentInfo, sections: Vec<SectionRecord>) -> Self {
        Self { info, sections }
    }
}
