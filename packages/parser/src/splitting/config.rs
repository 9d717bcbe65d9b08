//! Configuration for the Thai law hierarchy.

use super::registry::HierarchyRegistry;
use super::types::SectionTypeSpec;
use crate::config::DEFAULT_SECTION_TYPES;

/// Create hierarchy registry for the Thai law structure.
///
/// The hierarchy represents the structural nesting of Thai legislation as
/// delivered by the upstream feed:
///
/// ```text
/// บรรพ (book)
/// └── ภาค (part)
///     └── ลักษณะ (title)
///         └── หมวด (chapter)
///             └── ส่วน (division)
///                 └── มาตรา (section)
///                     └── อนุมาตรา (subsection, from the text)
/// ```
///
/// Any level may be missing from a given document. Preface, provision,
/// footnote, countersignature and miscellaneous types are recognised
/// alongside the levels.
#[must_use]
pub fn create_thai_law_hierarchy() -> HierarchyRegistry {
    let mut registry = HierarchyRegistry::new();
    for (id, name) in DEFAULT_SECTION_TYPES {
        registry.register(SectionTypeSpec::new(*id, *name));
    }
    registry
}
