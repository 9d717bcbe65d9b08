//! Document and batch entry points.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::builder::TreeBuilder;
use crate::config::ParserConfig;
use crate::error::Result;
use crate::source::read_document;
use crate::splitting::{create_thai_law_hierarchy, HierarchyRegistry};
use crate::tree::{LawCollection, LawTree};
use crate::types::LawDocument;

/// Parser for Thai law documents.
///
/// Holds the section-type hierarchy and build options. A parser is immutable
/// and can be shared across threads.
#[derive(Debug, Clone)]
pub struct LawParser {
    hierarchy: HierarchyRegistry,
    deepest_subsection: bool,
    documents: Vec<PathBuf>,
}

impl Default for LawParser {
    fn default() -> Self {
        Self::new(create_thai_law_hierarchy())
    }
}

impl LawParser {
    /// Create a parser over a section-type hierarchy.
    #[must_use]
    pub fn new(hierarchy: HierarchyRegistry) -> Self {
        Self {
            hierarchy,
            deepest_subsection: false,
            documents: Vec::new(),
        }
    }

    /// Create a parser from a validated configuration.
    pub fn from_config(config: &ParserConfig) -> Result<Self> {
        Ok(Self {
            hierarchy: config.hierarchy()?,
            deepest_subsection: config.deepest_subsection,
            documents: config
                .documents
                .iter()
                .map(|entry| entry.path.clone())
                .collect(),
        })
    }

    /// Set whether sections are split into subsection children.
    #[must_use]
    pub fn with_subsections(mut self, enabled: bool) -> Self {
        self.deepest_subsection = enabled;
        self
    }

    /// Section-type hierarchy in use.
    #[must_use]
    pub fn hierarchy(&self) -> &HierarchyRegistry {
        &self.hierarchy
    }

    fn builder(&self) -> TreeBuilder<'_> {
        TreeBuilder::new(&self.hierarchy).with_subsections(self.deepest_subsection)
    }

    /// Build the tree of one document.
    pub fn parse_document(&self, document: &LawDocument) -> Result<LawTree> {
        let tree = self.builder().build_document(document)?;
        tracing::debug!(
            law_code = %document.info.law_code,
            depth = tree.structure_depth(),
            "Parsed document"
        );
        Ok(tree)
    }

    /// Build trees for many documents in parallel.
    ///
    /// Trees come back in input order. The first failing document aborts the
    /// batch and its error names the document.
    pub fn parse_documents(&self, documents: &[LawDocument]) -> Result<LawCollection> {
        let trees = documents
            .par_iter()
            .map(|document| self.parse_document(document))
            .collect::<Result<Vec<_>>>()?;
        Ok(LawCollection::new(trees))
    }

    /// Read and build documents from dump files in parallel.
    pub fn parse_files<P: AsRef<Path> + Sync>(&self, paths: &[P]) -> Result<LawCollection> {
        let trees = paths
            .par_iter()
            .map(|path| self.parse_document(&read_document(path.as_ref())?))
            .collect::<Result<Vec<_>>>()?;
        Ok(LawCollection::new(trees))
    }

    /// Read and build the documents listed in the configuration.
    pub fn parse_config_documents(&self) -> Result<LawCollection> {
        self.parse_files(&self.documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParserError;
    use crate::types::{DocumentInfo, SectionRecord};
    use pretty_assertions::assert_eq;

    fn document(code: &str, sections: usize) -> LawDocument {
        let records = (1..=sections)
            .map(|no| {
                SectionRecord::new(
                    "4",
                    format!("มาตรา {no}"),
                    no.to_string(),
                    format!("มาตรา {no} ข้อความ\n(1) หนึ่ง\n(2) สอง"),
                )
            })
            .collect();
        LawDocument::new(DocumentInfo::new("พระราชบัญญัติทดสอบ", "", code), records)
    }

    #[test]
    fn test_parse_documents_keeps_order() {
        let parser = LawParser::default();
        let documents: Vec<LawDocument> = (0..8).map(|i| document(&format!("D{i}"), i + 1)).collect();

        let collection = parser.parse_documents(&documents).unwrap();
        assert_eq!(collection.len(), 8);
        for (i, tree) in collection.iter().enumerate() {
            assert_eq!(tree.law_code, format!("D{i}"));
            assert_eq!(tree.section_children.len(), i + 1);
        }
        assert_eq!(collection.get_max_depth(), 1);
    }

    #[test]
    fn test_subsections_from_config() {
        let config = ParserConfig::from_yaml_str("deepest_subsection: true\n").unwrap();
        let parser = LawParser::from_config(&config).unwrap();

        let tree = parser.parse_document(&document("D", 1)).unwrap();
        assert_eq!(tree.structure_depth(), 2);
    }

    #[test]
    fn test_parse_documents_error_names_document() {
        let parser = LawParser::default();
        let empty = LawDocument::new(DocumentInfo::new("x", "", "BAD"), Vec::new());

        let err = parser
            .parse_documents(&[document("OK", 1), empty])
            .unwrap_err();
        assert!(matches!(err, ParserError::NoSections { ref law_code } if law_code == "BAD"));
    }

    #[test]
    fn test_parse_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.json");
        std::fs::write(
            &path,
            r#"{"lawInfo": {"lawNameTh": "พระราชบัญญัติ ก", "lawCode": "A"},
                "lawSections": [{"sectionTypeId": "4", "sectionLabel": "มาตรา 1",
                                 "sectionNo": "1", "sectionContent": "มาตรา 1 ข้อความ"}]}"#,
        )
        .unwrap();

        let parser = LawParser::default();
        let collection = parser.parse_files(&[&path]).unwrap();
        assert_eq!(collection.len(), 1);
        assert_eq!(collection[0].law_code, "A");
    }
}
