//! Types for the level splitting system.

use serde::{Deserialize, Serialize};

use crate::config::{
    FOOTNOTE_NAME, MISCELLANEOUS_NAME, PREFACE_NAME, PROVISION_NAME, RESPONDENT_NAME,
    SECTION_NAME,
};
use crate::types::SectionRecord;

/// Structural role of a section type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionRole {
    /// Preamble preceding the enacting sections.
    Preface,
    /// A numbered section (มาตรา), the leaf unit of a law.
    Section,
    /// A hierarchy level (book, part, title, chapter, division).
    Level,
    /// Transitional provisions, appended after the main hierarchy.
    Provision,
    /// Royal countersignature; recognised but never placed in the tree.
    Respondent,
    /// Trailing annotations; the document is truncated at the first one.
    Footnote,
    /// Miscellaneous group markers, chained in the leaf builder.
    Miscellaneous,
}

impl SectionRole {
    /// Infer a role from a Thai section-type name.
    ///
    /// Any name that is not one of the special types is a hierarchy level.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            PREFACE_NAME => Self::Preface,
            SECTION_NAME => Self::Section,
            PROVISION_NAME => Self::Provision,
            RESPONDENT_NAME => Self::Respondent,
            FOOTNOTE_NAME => Self::Footnote,
            MISCELLANEOUS_NAME => Self::Miscellaneous,
            _ => Self::Level,
        }
    }
}

/// Declarative specification of one section type of the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionTypeSpec {
    /// Type id as delivered by the feed.
    pub id: String,

    /// Thai name, used as `section_type` of the nodes this type produces.
    pub name: String,

    /// Structural role.
    pub role: SectionRole,
}

impl SectionTypeSpec {
    /// Create a new section-type specification with its role inferred from the name.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            role: SectionRole::from_name(&name),
            name,
        }
    }

    /// Set the role explicitly.
    #[must_use]
    pub fn with_role(mut self, role: SectionRole) -> Self {
        self.role = role;
        self
    }
}

/// Result of splitting a record list at one hierarchy level.
#[derive(Debug, Clone, PartialEq)]
pub enum SplitOutcome<'a> {
    /// The level is present: one child group per parent marker.
    Split {
        /// Marker records of this level, in source order.
        parents: Vec<&'a SectionRecord>,
        /// Records following each marker, up to the next marker.
        children: Vec<Vec<&'a SectionRecord>>,
        /// Level to apply to each child group.
        next_level: usize,
        /// Thai name of this level.
        level_name: String,
        /// Records before the first marker, built as leaves ahead of the parents.
        leading: Option<Vec<&'a SectionRecord>>,
    },

    /// No marker of this level occurs; retry at `next_level`.
    Absent {
        next_level: usize,
        level_name: String,
    },

    /// Every level has been tried; the records are leaves.
    Exhausted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_name() {
        assert_eq!(SectionRole::from_name("คำปรารภ"), SectionRole::Preface);
        assert_eq!(SectionRole::from_name("มาตรา"), SectionRole::Section);
        assert_eq!(SectionRole::from_name(" บทเฉพาะกาล "), SectionRole::Provision);
        assert_eq!(SectionRole::from_name("หมายเหตุ"), SectionRole::Footnote);
        assert_eq!(SectionRole::from_name("เบ็ดเตล็ด"), SectionRole::Miscellaneous);
        assert_eq!(SectionRole::from_name("หมวด"), SectionRole::Level);
    }

    #[test]
    fn test_section_type_spec_builder() {
        let spec = SectionTypeSpec::new("8", "หมวด");
        assert_eq!(spec.role, SectionRole::Level);

        let spec = SectionTypeSpec::new("1", "Section").with_role(SectionRole::Section);
        assert_eq!(spec.id, "1");
        assert_eq!(spec.name, "Section");
        assert_eq!(spec.role, SectionRole::Section);
    }

    #[test]
    fn test_role_deserialize_lowercase() {
        let role: SectionRole = serde_yaml_ng::from_str("miscellaneous").unwrap();
        assert_eq!(role, SectionRole::Miscellaneous);
    }
}
