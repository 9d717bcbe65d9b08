//! Hierarchy registry for level splitting.

use std::collections::HashMap;

use super::types::{SectionRole, SectionTypeSpec};
use crate::config::SectionTypeEntry;
use crate::error::{ParserError, Result};

/// Registry of section-type specifications.
///
/// Keeps registration order: hierarchy levels are split outermost first, in
/// the order they were registered.
#[derive(Debug, Clone)]
pub struct HierarchyRegistry {
    specs: HashMap<String, SectionTypeSpec>,
    order: Vec<String>,
}

impl HierarchyRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            specs: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Build a validated registry from configuration entries.
    pub fn from_entries(entries: &[SectionTypeEntry]) -> Result<Self> {
        let mut registry = Self::new();
        for entry in entries {
            if registry.is_recognized(&entry.id) {
                return Err(ParserError::InvalidSectionType(format!(
                    "duplicate section type id '{}'",
                    entry.id
                )));
            }
            registry.register(
                SectionTypeSpec::new(entry.id.trim(), entry.name.trim())
                    .with_role(entry.resolved_role()),
            );
        }
        registry.validate()?;
        Ok(registry)
    }

    /// Register a section-type specification, replacing any previous one with the same id.
    pub fn register(&mut self, spec: SectionTypeSpec) {
        if !self.specs.contains_key(&spec.id) {
            self.order.push(spec.id.clone());
        }
        self.specs.insert(spec.id.clone(), spec);
    }

    /// Check that the registry can drive the parser.
    ///
    /// Exactly one section type is required; every other special role may
    /// appear at most once.
    pub fn validate(&self) -> Result<()> {
        let count = |role: SectionRole| {
            self.specs.values().filter(|spec| spec.role == role).count()
        };

        if count(SectionRole::Section) != 1 {
            return Err(ParserError::InvalidSectionType(format!(
                "expected exactly one section type, found {}",
                count(SectionRole::Section)
            )));
        }

        for role in [
            SectionRole::Preface,
            SectionRole::Provision,
            SectionRole::Respondent,
            SectionRole::Footnote,
            SectionRole::Miscellaneous,
        ] {
            if count(role) > 1 {
                return Err(ParserError::InvalidSectionType(format!(
                    "role {role:?} is assigned to more than one section type"
                )));
            }
        }

        Ok(())
    }

    /// Get the specification for a type id.
    #[must_use]
    pub fn get_spec(&self, type_id: &str) -> Option<&SectionTypeSpec> {
        self.specs.get(type_id)
    }

    /// Check if a type id is part of the catalogue.
    #[must_use]
    pub fn is_recognized(&self, type_id: &str) -> bool {
        self.specs.contains_key(type_id)
    }

    /// Role of a type id, if recognised.
    #[must_use]
    pub fn role_of(&self, type_id: &str) -> Option<SectionRole> {
        self.specs.get(type_id).map(|spec| spec.role)
    }

    /// Check whether a type id has the given role.
    #[must_use]
    pub fn has_role(&self, type_id: &str, role: SectionRole) -> bool {
        self.role_of(type_id) == Some(role)
    }

    /// First registered spec with the given role.
    #[must_use]
    pub fn spec_for(&self, role: SectionRole) -> Option<&SectionTypeSpec> {
        self.order
            .iter()
            .filter_map(|id| self.specs.get(id))
            .find(|spec| spec.role == role)
    }

    /// Type id of the section (มาตรา) type.
    #[must_use]
    pub fn section_id(&self) -> Option<&str> {
        self.spec_for(SectionRole::Section).map(|spec| spec.id.as_str())
    }

    /// Hierarchy levels, outermost first.
    pub fn levels(&self) -> impl Iterator<Item = &SectionTypeSpec> {
        self.order
            .iter()
            .filter_map(|id| self.specs.get(id))
            .filter(|spec| spec.role == SectionRole::Level)
    }

    /// Specification of the hierarchy level at `level`.
    #[must_use]
    pub fn level(&self, level: usize) -> Option<&SectionTypeSpec> {
        self.levels().nth(level)
    }

    /// Number of hierarchy levels.
    #[must_use]
    pub fn level_count(&self) -> usize {
        self.levels().count()
    }
}

impl Default for HierarchyRegistry {
    fn default() -> Self {
        Self::new()
    }
}
