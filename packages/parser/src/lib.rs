//! Thai law parser - Rebuild the structure of Thai legislation.
//!
//! The upstream law feed delivers each law as a flat list of section
//! records (chapter markers, sections, footnotes, ...). This crate
//! reconstructs the hierarchy (บรรพ, ภาค, ลักษณะ, หมวด, ส่วน, มาตรา,
//! อนุมาตรา) as a [`LawTree`] and extracts section cross-references.
//!
//! # Example
//!
//! ```
//! use lawtree_parser::{DocumentInfo, LawDocument, LawParser, SectionRecord};
//!
//! let document = LawDocument::new(
//!     DocumentInfo::new("พระราชบัญญัติตัวอย่าง พ.ศ. 2560", "Example Act", "A1"),
//!     vec![
//!         SectionRecord::new("8", "หมวด 1", "1", "หมวด 1 บททั่วไป"),
//!         SectionRecord::new("4", "มาตรา 1", "1", "มาตรา 1 ให้ใช้มาตรา 2 ถึงมาตรา 4"),
//!     ],
//! );
//!
//! let tree = LawParser::default().parse_document(&document).unwrap();
//! let chapter = &tree.section_children[0];
//! assert_eq!(chapter.section_name.as_deref(), Some("บททั่วไป"));
//! assert_eq!(chapter.section_children[0].section_reference, vec!["2", "3", "4"]);
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Constants, section-type catalogue and YAML configuration
//! - [`types`]: Input records and document header
//! - [`error`]: Error types and Result alias
//! - [`text`]: Text normalisation for Thai sources
//! - [`source`]: Reading raw document dumps
//! - [`splitting`]: Hierarchy registry and level splitter
//! - [`builder`]: Tree and leaf builders
//! - [`subsection`]: Subsection splitting of section bodies
//! - [`reference`]: Cross-reference extraction
//! - [`tree`]: `LawTree` and `LawCollection`
//! - [`writer`]: JSON persistence
//! - [`parser`]: Document and batch entry points
//! - [`cli`]: Command-line interface

pub mod builder;
pub mod cli;
pub mod config;
pub mod error;
pub mod parser;
pub mod reference;
pub mod source;
pub mod splitting;
pub mod subsection;
pub mod text;
pub mod tree;
pub mod types;
pub mod writer;

// Re-export main entry points
pub use parser::LawParser;
pub use source::{parse_document_json, read_document};

// Re-export commonly used items
pub use config::ParserConfig;
pub use error::{ParserError, Result};
pub use reference::extract_references;
pub use tree::{LawCollection, LawSectionReference, LawTree, LeafOptions, ReferenceResolver};
pub use types::{DocumentInfo, LawDocument, LawType, SectionRecord};
