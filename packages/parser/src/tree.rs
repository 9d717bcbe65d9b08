//! The `LawTree` hierarchy and `LawCollection` aggregate.
//!
//! A `LawTree` is an owned tree: every node owns its children in source
//! order and carries the document identity (law type, names, code) so that
//! leaves pooled from several documents stay self-describing. Field names
//! serialize in snake_case; the camelCase names of older corpora are
//! accepted on read.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

use crate::config::{CONTENT_PREVIEW_CHARS, SECTION_NAME};
use crate::types::{loose_optional_string, DocumentInfo};

/// A cited section resolved to the law it belongs to.
///
/// Written by a [`ReferenceResolver`]; the parser never fills it itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LawSectionReference {
    /// Cited section number (e.g. "5", "10/1").
    #[serde(alias = "sectionNo")]
    pub section_no: String,

    /// Name of the law the section belongs to.
    #[serde(alias = "lawName")]
    pub law_name: String,

    /// Whether the citation should be followed downstream.
    #[serde(default)]
    pub include: bool,
}

impl LawSectionReference {
    /// Create a new resolved reference.
    #[must_use]
    pub fn new(section_no: impl Into<String>, law_name: impl Into<String>, include: bool) -> Self {
        Self {
            section_no: section_no.into(),
            law_name: law_name.into(),
            include,
        }
    }
}

/// External collaborator resolving a leaf's raw citations to target laws.
pub trait ReferenceResolver {
    /// Resolve the citations of one leaf.
    fn resolve(&self, leaf: &LawTree) -> Vec<LawSectionReference>;
}

/// One node of the reconstructed hierarchy of a law.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LawTree {
    #[serde(default, alias = "lawType")]
    pub law_type: String,

    #[serde(default, alias = "nameTh")]
    pub name_th: String,

    #[serde(default, alias = "nameEn")]
    pub name_en: String,

    #[serde(default, alias = "lawCode")]
    pub law_code: String,

    /// Level name ("หมวด", "มาตรา", "อนุมาตรา", ...); `None` on the document root.
    #[serde(default, alias = "sectionType")]
    pub section_type: Option<String>,

    #[serde(default, alias = "sectionNo", deserialize_with = "loose_optional_string")]
    pub section_no: Option<String>,

    #[serde(default, alias = "sectionId", deserialize_with = "loose_optional_string")]
    pub section_id: Option<String>,

    #[serde(default, alias = "sectionLabel")]
    pub section_label: Option<String>,

    /// Human title of group nodes.
    #[serde(default, alias = "sectionName")]
    pub section_name: Option<String>,

    #[serde(default, alias = "sectionContent")]
    pub section_content: Option<String>,

    /// Content lines, without the law-name prefix.
    #[serde(default, alias = "sectionClause")]
    pub section_clause: Vec<String>,

    #[serde(default, alias = "sectionKeyword")]
    pub section_keyword: Vec<String>,

    #[serde(default, alias = "sectionSummary")]
    pub section_summary: Option<String>,

    /// Section numbers cited by this node's content.
    #[serde(default, alias = "sectionReference")]
    pub section_reference: Vec<String>,

    #[serde(default, alias = "lawSectionReference")]
    pub law_section_reference: Vec<LawSectionReference>,

    #[serde(default, alias = "sectionChildren")]
    pub section_children: Vec<LawTree>,
}

impl LawTree {
    /// Create a node carrying the identity of `info` and nothing else.
    #[must_use]
    pub fn new(info: &DocumentInfo) -> Self {
        Self {
            law_type: info.law_type.clone(),
            name_th: info.name_th.clone(),
            name_en: info.name_en.clone(),
            law_code: info.law_code.clone(),
            ..Self::default()
        }
    }

    /// Set the section type.
    #[must_use]
    pub fn with_section_type(mut self, section_type: impl Into<String>) -> Self {
        self.section_type = Some(section_type.into());
        self
    }

    /// Set the section number.
    #[must_use]
    pub fn with_section_no(mut self, section_no: impl Into<String>) -> Self {
        self.section_no = Some(section_no.into());
        self
    }

    /// Set the source section id.
    #[must_use]
    pub fn with_section_id(mut self, section_id: Option<String>) -> Self {
        self.section_id = section_id;
        self
    }

    /// Set the label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.section_label = Some(label.into());
        self
    }

    /// Set the human title.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.section_name = Some(name.into());
        self
    }

    /// Set the content.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.section_content = Some(content.into());
        self
    }

    /// Set the content lines.
    #[must_use]
    pub fn with_clause(mut self, clause: Vec<String>) -> Self {
        self.section_clause = clause;
        self
    }

    /// Set the cited section numbers.
    #[must_use]
    pub fn with_reference(mut self, reference: Vec<String>) -> Self {
        self.section_reference = reference;
        self
    }

    /// Set the children.
    #[must_use]
    pub fn with_children(mut self, children: Vec<LawTree>) -> Self {
        self.section_children = children;
        self
    }

    /// True when the node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.section_children.is_empty()
    }

    /// True for section (มาตรา) nodes.
    #[must_use]
    pub fn is_section(&self) -> bool {
        self.section_type.as_deref() == Some(SECTION_NAME)
    }

    /// Collect leaf nodes in source order.
    ///
    /// With [`LeafOptions::stop_at_section`], section nodes are returned
    /// whole instead of their subsection children. Keywords restrict which
    /// children of this node are descended into: a child is kept when its
    /// `section_name` contains any keyword. Deeper levels are not filtered.
    #[must_use]
    pub fn get_leaf_nodes(&self, options: &LeafOptions) -> Vec<&LawTree> {
        let mut leaves = Vec::new();
        if self.is_leaf() || (options.stop_at_section && self.is_section()) {
            leaves.push(self);
            return leaves;
        }

        for child in self
            .section_children
            .iter()
            .filter(|child| options.matches(child))
        {
            child.collect_leaves(options.stop_at_section, &mut leaves);
        }
        leaves
    }

    fn collect_leaves<'a>(&'a self, stop_at_section: bool, leaves: &mut Vec<&'a LawTree>) {
        if self.is_leaf() || (stop_at_section && self.is_section()) {
            leaves.push(self);
            return;
        }
        for child in &self.section_children {
            child.collect_leaves(stop_at_section, leaves);
        }
    }

    /// Visit every leaf mutably, in source order.
    pub fn for_each_leaf_mut(&mut self, f: &mut impl FnMut(&mut LawTree)) {
        if self.is_leaf() {
            f(self);
            return;
        }
        for child in &mut self.section_children {
            child.for_each_leaf_mut(f);
        }
    }

    /// Write resolver output into `law_section_reference` of every leaf.
    ///
    /// Returns the number of leaves that received at least one reference.
    pub fn apply_references(&mut self, resolver: &impl ReferenceResolver) -> usize {
        let mut updated = 0;
        self.for_each_leaf_mut(&mut |leaf| {
            let references = resolver.resolve(leaf);
            if !references.is_empty() {
                updated += 1;
            }
            leaf.law_section_reference = references;
        });
        updated
    }

    /// Depth of the subtree rooted here; a leaf has depth 1.
    #[must_use]
    pub fn get_max_depth(&self) -> usize {
        1 + self
            .section_children
            .iter()
            .map(LawTree::get_max_depth)
            .max()
            .unwrap_or(0)
    }

    /// Depth of the structure below a document root.
    ///
    /// A document of plain sections has depth 1; subsections add one level.
    #[must_use]
    pub fn structure_depth(&self) -> usize {
        self.get_max_depth().saturating_sub(1)
    }
}

impl fmt::Display for LawTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let preview = self.section_content.as_deref().map(|content| {
            if content.chars().count() > CONTENT_PREVIEW_CHARS {
                let head: String = content.chars().take(CONTENT_PREVIEW_CHARS).collect();
                format!("{head}...")
            } else {
                content.to_string()
            }
        });

        let parts: Vec<&str> = [
            Some(self.law_type.as_str()),
            self.section_label.as_deref(),
            preview.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect();

        writeln!(f, "Law Unit: {}", parts.join("  "))?;
        if !self.section_children.is_empty() {
            writeln!(f, "Contains {} sub-units", self.section_children.len())?;
        }
        if !self.section_reference.is_empty() {
            write!(f, "Total References: {}", self.section_reference.len())?;
        }
        Ok(())
    }
}

/// Options for [`LawTree::get_leaf_nodes`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeafOptions {
    /// Return section nodes whole instead of their subsections.
    pub stop_at_section: bool,

    /// Descend only into top-level children whose name contains one of these.
    pub keywords: Vec<String>,
}

impl LeafOptions {
    /// Set whether descent stops at section nodes.
    #[must_use]
    pub fn with_stop_at_section(mut self, stop: bool) -> Self {
        self.stop_at_section = stop;
        self
    }

    /// Add a name keyword.
    #[must_use]
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keywords.push(keyword.into());
        self
    }

    fn matches(&self, child: &LawTree) -> bool {
        if self.keywords.is_empty() {
            return true;
        }
        child.section_name.as_deref().is_some_and(|name| {
            self.keywords
                .iter()
                .any(|keyword| name.contains(keyword.as_str()))
        })
    }
}

/// An ordered collection of document trees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LawCollection {
    trees: Vec<LawTree>,
}

impl LawCollection {
    /// Create a collection from document trees.
    #[must_use]
    pub fn new(trees: Vec<LawTree>) -> Self {
        Self { trees }
    }

    /// Concatenate two collections.
    #[must_use]
    pub fn merge(mut self, other: LawCollection) -> Self {
        self.trees.extend(other.trees);
        self
    }

    /// Append one document tree.
    pub fn push(&mut self, tree: LawTree) {
        self.trees.push(tree);
    }

    /// Number of documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    /// True when the collection holds no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Document tree at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&LawTree> {
        self.trees.get(index)
    }

    /// Iterate over document trees.
    pub fn iter(&self) -> std::slice::Iter<'_, LawTree> {
        self.trees.iter()
    }

    /// Deepest structure over all documents (see [`LawTree::structure_depth`]).
    #[must_use]
    pub fn get_max_depth(&self) -> usize {
        self.trees
            .iter()
            .map(LawTree::structure_depth)
            .max()
            .unwrap_or(0)
    }

    /// Leaves of every document, in collection order.
    #[must_use]
    pub fn get_leaf_nodes(&self, options: &LeafOptions) -> Vec<&LawTree> {
        self.trees
            .iter()
            .flat_map(|tree| tree.get_leaf_nodes(options))
            .collect()
    }

    /// Apply a resolver to every document; returns the number of leaves updated.
    pub fn apply_references(&mut self, resolver: &impl ReferenceResolver) -> usize {
        self.trees
            .iter_mut()
            .map(|tree| tree.apply_references(resolver))
            .sum()
    }
}

impl From<LawTree> for LawCollection {
    fn from(tree: LawTree) -> Self {
        Self { trees: vec![tree] }
    }
}

impl From<Vec<LawTree>> for LawCollection {
    fn from(trees: Vec<LawTree>) -> Self {
        Self { trees }
    }
}

impl Extend<LawTree> for LawCollection {
    fn extend<I: IntoIterator<Item = LawTree>>(&mut self, iter: I) {
        self.trees.extend(iter);
    }
}

impl FromIterator<LawTree> for LawCollection {
    fn from_iter<I: IntoIterator<Item = LawTree>>(iter: I) -> Self {
        Self {
            trees: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for LawCollection {
    type Item = LawTree;
    type IntoIter = std::vec::IntoIter<LawTree>;

    fn into_iter(self) -> Self::IntoIter {
        self.trees.into_iter()
    }
}

impl<'a> IntoIterator for &'a LawCollection {
    type Item = &'a LawTree;
    type IntoIter = std::slice::Iter<'a, LawTree>;

    fn into_iter(self) -> Self::IntoIter {
        self.trees.iter()
    }
}

impl Index<usize> for LawCollection {
    type Output = LawTree;

    fn index(&self, index: usize) -> &Self::Output {
        &self.trees[index]
    }
}

impl fmt::Display for LawCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Law Collection containing {} LawTree objects:", self.len())?;
        let all = LeafOptions::default();
        for tree in &self.trees {
            write!(
                f,
                "\nLaw Type: {}\tName (Thai): {}\tName (English): {}\tLaw Code: {}\tTotal Levels: {}\tTotal Leaf Nodes: {}",
                tree.law_type,
                tree.name_th,
                tree.name_en,
                tree.law_code,
                tree.structure_depth(),
                tree.get_leaf_nodes(&all).len()
            )?;
        }
        Ok(())
    }
}
