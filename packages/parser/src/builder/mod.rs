//! Tree builder: turns one flat document into a [`LawTree`].
//!
//! The build runs in four steps:
//!
//! 1. Footnote records and everything after the last section are cut off.
//! 2. The preface span and the transitional provisions are carved out into
//!    subtrees of their own.
//! 3. The remaining records are split level by level (บรรพ, ภาค, ลักษณะ,
//!    หมวด, ส่วน), skipping levels that do not occur.
//! 4. Records below the last level become leaves via [`LeafBuilder`].

mod leaf;

pub use leaf::{common_root, LeafBuilder};

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{ParserError, Result};
use crate::splitting::{HierarchyRegistry, LevelSplitter, SectionRole, SplitOutcome};
use crate::tree::LawTree;
use crate::types::{DocumentInfo, LawDocument, SectionRecord};

/// Group title after the marker number, e.g. "บททั่วไป" in "หมวด 1 บททั่วไป".
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static GROUP_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(.+)").expect("valid regex"));

/// Builds law trees from flat documents.
#[derive(Debug, Clone, Copy)]
pub struct TreeBuilder<'a> {
    hierarchy: &'a HierarchyRegistry,
    deepest_subsection: bool,
}

impl<'a> TreeBuilder<'a> {
    /// Create a new tree builder over a section-type hierarchy.
    #[must_use]
    pub fn new(hierarchy: &'a HierarchyRegistry) -> Self {
        Self {
            hierarchy,
            deepest_subsection: false,
        }
    }

    /// Set whether sections are split into subsection children.
    #[must_use]
    pub fn with_subsections(mut self, enabled: bool) -> Self {
        self.deepest_subsection = enabled;
        self
    }

    /// Build the tree of one document.
    ///
    /// # Arguments
    /// * `document` - Normalised document
    ///
    /// # Returns
    /// The document root: preface first, then the level hierarchy and
    /// top-level leaves, then the transitional provisions.
    ///
    /// # Errors
    /// * [`ParserError::NoSections`] when no section marker survives truncation
    /// * [`ParserError::Document`] wrapping any structural error, with the law code
    pub fn build_document(&self, document: &LawDocument) -> Result<LawTree> {
        let law_code = &document.info.law_code;
        self.build_inner(document)
            .map_err(|e| e.in_document(law_code.as_str()))
    }

    fn build_inner(&self, document: &LawDocument) -> Result<LawTree> {
        let info = &document.info;

        let sections = self.truncate_footnotes(&document.sections);
        if !sections
            .iter()
            .any(|record| self.role(record) == Some(SectionRole::Section))
        {
            return Err(ParserError::NoSections {
                law_code: info.law_code.clone(),
            });
        }
        tracing::debug!(
            law_code = %info.law_code,
            records = sections.len(),
            dropped = document.sections.len() - sections.len(),
            "Building document tree"
        );

        let records: Vec<&SectionRecord> = sections.iter().collect();
        let (preface, records) = self.carve_preface(info, records)?;
        let (provision, records) = self.carve_provision(info, records)?;

        let mut children = Vec::new();
        children.extend(preface);
        children.extend(self.build(info, &records, 0)?);
        children.extend(provision);

        Ok(LawTree::new(info).with_children(children))
    }

    /// Cut at the first footnote, then back to the last section record.
    fn truncate_footnotes<'s>(&self, sections: &'s [SectionRecord]) -> &'s [SectionRecord] {
        let cut = sections
            .iter()
            .position(|record| self.role(record) == Some(SectionRole::Footnote))
            .unwrap_or(sections.len());
        let head = &sections[..cut];

        match head
            .iter()
            .rposition(|record| self.role(record) == Some(SectionRole::Section))
        {
            Some(last) => &head[..=last],
            None => head,
        }
    }

    /// Remove the preface marker and the sections it introduces.
    ///
    /// The span ends at the next recognised marker that is not a section.
    fn carve_preface<'s>(
        &self,
        info: &DocumentInfo,
        records: Vec<&'s SectionRecord>,
    ) -> Result<(Option<LawTree>, Vec<&'s SectionRecord>)> {
        let Some(start) = records
            .iter()
            .position(|record| self.role(record) == Some(SectionRole::Preface))
        else {
            return Ok((None, records));
        };

        let end = records[start + 1..]
            .iter()
            .position(|record| {
                !matches!(self.role(record), None | Some(SectionRole::Section))
            })
            .map_or(records.len(), |offset| start + 1 + offset);

        let node = self.carved_node(
            info,
            SectionRole::Preface,
            records[start],
            &records[start + 1..end],
        )?;

        let mut remaining = records[..start].to_vec();
        remaining.extend_from_slice(&records[end..]);
        Ok((Some(node), remaining))
    }

    /// Remove the transitional provisions marker and everything after it.
    fn carve_provision<'s>(
        &self,
        info: &DocumentInfo,
        mut records: Vec<&'s SectionRecord>,
    ) -> Result<(Option<LawTree>, Vec<&'s SectionRecord>)> {
        let Some(start) = records
            .iter()
            .position(|record| self.role(record) == Some(SectionRole::Provision))
        else {
            return Ok((None, records));
        };

        let tail = records.split_off(start);
        let node = self.carved_node(info, SectionRole::Provision, tail[0], &tail[1..])?;
        Ok((Some(node), records))
    }

    fn carved_node(
        &self,
        info: &DocumentInfo,
        role: SectionRole,
        marker: &SectionRecord,
        body: &[&SectionRecord],
    ) -> Result<LawTree> {
        let name = self
            .hierarchy
            .spec_for(role)
            .map(|spec| spec.name.clone())
            .unwrap_or_default();

        Ok(LawTree::new(info)
            .with_section_type(name.clone())
            .with_name(name)
            .with_section_id(marker.id.clone())
            .with_label(marker.label.trim())
            .with_content(marker.content.trim())
            .with_children(self.leaves(info).build(body)?))
    }

    /// Build the nodes for `sections`, starting at hierarchy `level`.
    fn build(
        &self,
        info: &DocumentInfo,
        sections: &[&SectionRecord],
        level: usize,
    ) -> Result<Vec<LawTree>> {
        let splitter = LevelSplitter::new(self.hierarchy);
        let mut level = level;

        loop {
            match splitter.split(sections, level)? {
                SplitOutcome::Exhausted => return self.leaves(info).build(sections),
                SplitOutcome::Absent {
                    next_level,
                    level_name,
                } => {
                    tracing::trace!(level = %level_name, "Level absent");
                    level = next_level;
                }
                SplitOutcome::Split {
                    parents,
                    children,
                    next_level,
                    level_name,
                    leading,
                } => {
                    let mut nodes = Vec::with_capacity(parents.len() + 1);
                    // Leading records may hold deeper markers, so they are built
                    // from the next level instead of as plain leaves.
                    if let Some(leading) = leading {
                        nodes.extend(self.build(info, &leading, next_level)?);
                    }
                    for (parent, group) in parents.into_iter().zip(children) {
                        let grandchildren = self.build(info, &group, next_level)?;
                        nodes.push(group_node(info, parent, &level_name, grandchildren));
                    }
                    return Ok(nodes);
                }
            }
        }
    }

    fn leaves<'i>(&self, info: &'i DocumentInfo) -> LeafBuilder<'i>
    where
        'a: 'i,
    {
        LeafBuilder::new(info, self.hierarchy).with_subsections(self.deepest_subsection)
    }

    fn role(&self, record: &SectionRecord) -> Option<SectionRole> {
        self.hierarchy.role_of(&record.type_id)
    }
}

/// Build a hierarchy-level node from its marker record.
fn group_node(
    info: &DocumentInfo,
    marker: &SectionRecord,
    level_name: &str,
    children: Vec<LawTree>,
) -> LawTree {
    let label = marker
        .label
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string();

    let name = match GROUP_NAME.captures(&marker.content) {
        Some(caps) => caps[1].trim().to_string(),
        None => {
            let name = marker.content.replace(label.as_str(), "").trim().to_string();
            tracing::debug!(label = %label, name = %name, "Group name without number");
            name
        }
    };

    LawTree::new(info)
        .with_section_type(level_name)
        .with_section_no(marker.number.trim())
        .with_section_id(marker.id.clone())
        .with_label(label)
        .with_name(name)
        .with_children(children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::splitting::create_thai_law_hierarchy;
    use crate::tree::LeafOptions;
    use pretty_assertions::assert_eq;

    fn info() -> DocumentInfo {
        DocumentInfo::new("พระราชบัญญัติทดสอบ พ.ศ. 2560", "Test Act", "T1")
    }

    fn section(no: &str) -> SectionRecord {
        SectionRecord::new("4", format!("มาตรา {no}"), no, format!("มาตรา {no} ข้อความ"))
            .with_id(format!("s{no}"))
    }

    fn marker(type_id: &str, label: &str, no: &str, content: &str) -> SectionRecord {
        SectionRecord::new(type_id, label, no, content)
    }

    fn chapter(no: &str, title: &str) -> SectionRecord {
        marker("8", &format!("หมวด {no}"), no, &format!("หมวด {no} {title}"))
    }

    fn build(sections: Vec<SectionRecord>) -> Result<LawTree> {
        let hierarchy = create_thai_law_hierarchy();
        TreeBuilder::new(&hierarchy).build_document(&LawDocument::new(info(), sections))
    }

    fn section_nos(tree: &LawTree) -> Vec<String> {
        tree.get_leaf_nodes(&LeafOptions::default())
            .iter()
            .filter_map(|leaf| leaf.section_no.clone())
            .collect()
    }

    #[test]
    fn test_flat_document() {
        let tree = build(vec![section("1"), section("2")]).unwrap();

        assert_eq!(tree.name_th, "พระราชบัญญัติทดสอบ พ.ศ. 2560");
        assert_eq!(tree.law_type, "พระราชบัญญัติ");
        assert!(tree.section_type.is_none());
        assert_eq!(tree.section_children.len(), 2);
        assert_eq!(tree.structure_depth(), 1);
    }

    #[test]
    fn test_levels_and_skipped_level() {
        let tree = build(vec![
            chapter("1", "บททั่วไป"),
            section("1"),
            section("2"),
            chapter("2", "การกำกับดูแล"),
            marker("9", "ส่วนที่ 1", "1", "ส่วนที่ 1 คณะกรรมการ"),
            section("3"),
        ])
        .unwrap();

        assert_eq!(tree.section_children.len(), 2);

        let first = &tree.section_children[0];
        assert_eq!(first.section_type.as_deref(), Some("หมวด"));
        assert_eq!(first.section_no.as_deref(), Some("1"));
        assert_eq!(first.section_label.as_deref(), Some("หมวด 1"));
        assert_eq!(first.section_name.as_deref(), Some("บททั่วไป"));
        assert_eq!(first.section_children.len(), 2);

        let second = &tree.section_children[1];
        assert_eq!(second.section_children.len(), 1);
        let division = &second.section_children[0];
        assert_eq!(division.section_type.as_deref(), Some("ส่วน"));
        assert_eq!(division.section_name.as_deref(), Some("คณะกรรมการ"));
        assert_eq!(section_nos(division), vec!["3"]);

        assert_eq!(tree.structure_depth(), 3);
    }

    #[test]
    fn test_leading_sections_before_first_marker() {
        let tree = build(vec![section("1"), chapter("1", "บททั่วไป"), section("2")]).unwrap();

        assert_eq!(tree.section_children.len(), 2);
        assert!(tree.section_children[0].is_section());
        assert_eq!(tree.section_children[1].section_type.as_deref(), Some("หมวด"));
        assert_eq!(section_nos(&tree), vec!["1", "2"]);
    }

    #[test]
    fn test_leading_chunk_keeps_deeper_markers() {
        let tree = build(vec![
            marker("9", "ส่วนที่ 1", "1", "ส่วนที่ 1 บททั่วไป"),
            section("1"),
            chapter("1", "การกำกับดูแล"),
            section("2"),
        ])
        .unwrap();

        let types: Vec<Option<&str>> = tree
            .section_children
            .iter()
            .map(|child| child.section_type.as_deref())
            .collect();
        assert_eq!(types, vec![Some("ส่วน"), Some("หมวด")]);

        let division = &tree.section_children[0];
        assert_eq!(division.section_label.as_deref(), Some("ส่วนที่ 1"));
        assert_eq!(section_nos(division), vec!["1"]);
        assert_eq!(section_nos(&tree.section_children[1]), vec!["2"]);
        assert_eq!(tree.structure_depth(), 2);
    }

    #[test]
    fn test_preface_and_provision() {
        let tree = build(vec![
            marker("3", "", "", "โดยที่เป็นการสมควร"),
            section("1"),
            chapter("1", "บททั่วไป"),
            section("2"),
            marker("13", "บทเฉพาะกาล", "", "บทเฉพาะกาล"),
            section("3"),
            section("4"),
        ])
        .unwrap();

        let children = &tree.section_children;
        assert_eq!(children.len(), 3);

        let preface = &children[0];
        assert_eq!(preface.section_type.as_deref(), Some("คำปรารภ"));
        assert_eq!(preface.section_name.as_deref(), Some("คำปรารภ"));
        assert_eq!(preface.section_content.as_deref(), Some("โดยที่เป็นการสมควร"));
        assert_eq!(section_nos(preface), vec!["1"]);

        assert_eq!(children[1].section_type.as_deref(), Some("หมวด"));
        assert_eq!(section_nos(&children[1]), vec!["2"]);

        let provision = &children[2];
        assert_eq!(provision.section_type.as_deref(), Some("บทเฉพาะกาล"));
        assert_eq!(section_nos(provision), vec!["3", "4"]);
    }

    #[test]
    fn test_footnotes_truncated() {
        let tree = build(vec![
            section("1"),
            section("2"),
            marker("14", "", "", "ผู้รับสนองพระบรมราชโองการ"),
            marker("15", "", "", "หมายเหตุ"),
            section("99"),
        ])
        .unwrap();

        assert_eq!(section_nos(&tree), vec!["1", "2"]);
    }

    #[test]
    fn test_trailing_records_cut_without_footnote() {
        let tree = build(vec![
            section("1"),
            marker("14", "", "", "ผู้รับสนองพระบรมราชโองการ"),
        ])
        .unwrap();

        assert_eq!(section_nos(&tree), vec!["1"]);
    }

    #[test]
    fn test_no_sections() {
        let err = build(vec![chapter("1", "บททั่วไป")]).unwrap_err();
        assert!(matches!(err, ParserError::NoSections { ref law_code } if law_code == "T1"));

        let err = build(vec![marker("15", "", "", "หมายเหตุ"), section("1")]).unwrap_err();
        assert!(matches!(err, ParserError::NoSections { .. }));
    }

    #[test]
    fn test_structure_error_names_document() {
        let err = build(vec![chapter("1", "ก"), chapter("2", "ข"), section("1")]).unwrap_err();
        match err {
            ParserError::Document { law_code, source } => {
                assert_eq!(law_code, "T1");
                assert!(matches!(*source, ParserError::StructureMismatch { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_group_label_after_slash() {
        let node = group_node(
            &info(),
            &marker("8", "ส่วนที่ 1/หมวด ๑", "1", "หมวด ๑ บททั่วไป"),
            "หมวด",
            Vec::new(),
        );
        assert_eq!(node.section_label.as_deref(), Some("หมวด ๑"));
        assert_eq!(node.section_name.as_deref(), Some("บททั่วไป"));
    }

    #[test]
    fn test_group_name_crosses_line_break() {
        let node = group_node(
            &info(),
            &marker("8", "หมวด 1", "1", "หมวด 1\nบททั่วไป"),
            "หมวด",
            Vec::new(),
        );
        assert_eq!(node.section_name.as_deref(), Some("บททั่วไป"));
    }

    #[test]
    fn test_subsections_add_depth() {
        let hierarchy = create_thai_law_hierarchy();
        let document = LawDocument::new(
            info(),
            vec![SectionRecord::new(
                "4",
                "มาตรา 1",
                "1",
                "มาตรา 1 ให้\n(1) ข้อหนึ่ง\n(2) ข้อสอง",
            )],
        );

        let flat = TreeBuilder::new(&hierarchy).build_document(&document).unwrap();
        assert_eq!(flat.structure_depth(), 1);

        let deep = TreeBuilder::new(&hierarchy)
            .with_subsections(true)
            .build_document(&document)
            .unwrap();
        assert_eq!(deep.structure_depth(), 2);
        assert_eq!(section_nos(&deep), vec!["1(1)", "1(2)"]);
    }

    #[test]
    fn test_every_section_becomes_a_leaf() {
        let records = vec![
            marker("3", "", "", "คำปรารภ"),
            section("1"),
            chapter("1", "ก"),
            section("2"),
            marker("16", "", "", "บทกำหนดโทษ"),
            section("3"),
            chapter("2", "ข"),
            section("4"),
            marker("13", "บทเฉพาะกาล", "", "บทเฉพาะกาล"),
            section("5"),
        ];
        let tree = build(records).unwrap();

        let leaves = tree.get_leaf_nodes(&LeafOptions::default());
        assert_eq!(leaves.len(), 5);
        assert!(leaves.iter().all(|leaf| leaf.is_section()));
    }
}
