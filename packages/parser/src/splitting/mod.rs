//! Level splitting system for Thai law documents.
//!
//! This module classifies flat section records against the ordered
//! hierarchy of Thai legislation (บรรพ, ภาค, ลักษณะ, หมวด, ส่วน) and
//! partitions them level by level.

mod config;
mod engine;
mod registry;
mod types;

pub use config::create_thai_law_hierarchy;
pub use engine::LevelSplitter;
pub use registry::HierarchyRegistry;
pub use types::{SectionRole, SectionTypeSpec, SplitOutcome};
