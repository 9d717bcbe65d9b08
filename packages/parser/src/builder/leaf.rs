//! Leaf builder: sections, subsections and miscellaneous chains.

use crate::config::{is_ordinal_word, MISCELLANEOUS_NAME, SECTION_NAME, SUBSECTION_NAME};
use crate::error::Result;
use crate::reference::extract_references;
use crate::splitting::{HierarchyRegistry, SectionRole};
use crate::subsection::split_subsections;
use crate::text::collapse_whitespace;
use crate::tree::LawTree;
use crate::types::{DocumentInfo, SectionRecord};

/// Open miscellaneous nodes, outermost first.
///
/// A new miscellaneous marker becomes the only group child of the innermost
/// open node; sections attach to the innermost open node. The chain is
/// folded back into a single tree when the run ends.
#[derive(Debug, Default)]
struct MiscChain {
    open: Vec<LawTree>,
}

impl MiscChain {
    fn open(&mut self, node: LawTree) {
        self.open.push(node);
    }

    /// Attach a leaf to the innermost open node, or hand it back when none is open.
    fn attach(&mut self, leaf: LawTree) -> Option<LawTree> {
        match self.open.last_mut() {
            Some(innermost) => {
                innermost.section_children.push(leaf);
                None
            }
            None => Some(leaf),
        }
    }

    /// Fold the chain into its outermost node.
    fn close(mut self) -> Option<LawTree> {
        let mut inner = self.open.pop()?;
        while let Some(mut outer) = self.open.pop() {
            outer.section_children.push(inner);
            inner = outer;
        }
        Some(inner)
    }
}

/// Section number and label with an ordinal suffix folded in.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SectionKey {
    number: String,
    label: String,
}

impl SectionKey {
    /// Read "มาตรา 5 ทวิ ..." as section "5 ทวิ" when the word after the label is ordinal.
    fn from_record(record: &SectionRecord) -> Self {
        let number = record.number.trim();
        let label = record.label.trim();

        let ordinal = record
            .content
            .strip_prefix(label)
            .and_then(|rest| rest.strip_prefix(' '))
            .and_then(|rest| rest.split_once(' '))
            .map(|(word, _)| word)
            .filter(|word| !word.is_empty() && !word.contains(char::is_whitespace))
            .filter(|word| is_ordinal_word(word));

        match ordinal {
            Some(word) if !label.is_empty() => Self {
                number: format!("{number} {word}"),
                label: format!("{label} {word}"),
            },
            _ => Self {
                number: number.to_string(),
                label: label.to_string(),
            },
        }
    }
}

/// Longest substring shared by every title, trimmed.
///
/// Falls back to [`MISCELLANEOUS_NAME`] when there are no titles or they
/// share nothing but whitespace.
#[must_use]
pub fn common_root(titles: &[&str]) -> String {
    let Some(shortest) = titles
        .iter()
        .copied()
        .reduce(|a, b| if b.chars().count() < a.chars().count() { b } else { a })
    else {
        return MISCELLANEOUS_NAME.to_string();
    };

    let chars: Vec<char> = shortest.chars().collect();
    for len in (1..=chars.len()).rev() {
        for start in 0..=chars.len() - len {
            let candidate: String = chars[start..start + len].iter().collect();
            if titles.iter().all(|title| title.contains(candidate.as_str())) {
                let trimmed = candidate.trim();
                if trimmed.is_empty() {
                    return MISCELLANEOUS_NAME.to_string();
                }
                return trimmed.to_string();
            }
        }
    }

    MISCELLANEOUS_NAME.to_string()
}

/// Builds leaf nodes from a run of records below the last hierarchy level.
#[derive(Debug, Clone, Copy)]
pub struct LeafBuilder<'a> {
    info: &'a DocumentInfo,
    hierarchy: &'a HierarchyRegistry,
    deepest_subsection: bool,
}

impl<'a> LeafBuilder<'a> {
    /// Create a new leaf builder.
    #[must_use]
    pub fn new(info: &'a DocumentInfo, hierarchy: &'a HierarchyRegistry) -> Self {
        Self {
            info,
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

    /// Build leaves for `records`.
    ///
    /// Section records become leaves, miscellaneous markers open a chain
    /// that collects every following leaf, and all other types are skipped.
    pub fn build(&self, records: &[&SectionRecord]) -> Result<Vec<LawTree>> {
        let titles: Vec<&str> = records
            .iter()
            .filter(|record| self.role(record) == Some(SectionRole::Miscellaneous))
            .map(|record| record.title())
            .collect();
        let misc_name = common_root(&titles);

        let mut nodes = Vec::new();
        let mut chain = MiscChain::default();

        for record in records {
            match self.role(record) {
                Some(SectionRole::Miscellaneous) => {
                    chain.open(self.misc_node(record, &misc_name));
                }
                Some(SectionRole::Section) => {
                    let leaf = self.section_leaf(record)?;
                    if let Some(leaf) = chain.attach(leaf) {
                        nodes.push(leaf);
                    }
                }
                _ => {
                    tracing::trace!(
                        type_id = %record.type_id,
                        label = %record.label,
                        "Skipping non-leaf record"
                    );
                }
            }
        }

        nodes.extend(chain.close());
        Ok(nodes)
    }

    fn role(&self, record: &SectionRecord) -> Option<SectionRole> {
        self.hierarchy.role_of(&record.type_id)
    }

    fn misc_node(&self, record: &SectionRecord, misc_name: &str) -> LawTree {
        let key = SectionKey::from_record(record);
        let name_th = &self.info.name_th;

        let mut node = LawTree::new(self.info)
            .with_section_type(misc_name)
            .with_section_no(key.number)
            .with_section_id(record.id.clone())
            .with_label(format!("{name_th} {}", key.label))
            .with_content(format!("{name_th} {}", record.content));
        if let Some(name) = record.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            node = node.with_name(name);
        }
        node
    }

    fn section_leaf(&self, record: &SectionRecord) -> Result<LawTree> {
        let key = SectionKey::from_record(record);
        let name_th = &self.info.name_th;
        let content = &record.content;

        let mut leaf = LawTree::new(self.info)
            .with_section_type(SECTION_NAME)
            .with_section_no(key.number.clone())
            .with_section_id(record.id.clone())
            .with_label(format!("{name_th} {}", key.label))
            .with_content(format!("{name_th} {content}"))
            .with_clause(content.lines().map(str::to_string).collect())
            .with_reference(extract_references(content, &key.number)?);

        if self.deepest_subsection {
            if let Some(subsections) = split_subsections(content, &key.label) {
                let mut children = Vec::with_capacity(subsections.len());
                for subsection in subsections {
                    let index = &subsection.index;
                    children.push(
                        LawTree::new(self.info)
                            .with_section_type(SUBSECTION_NAME)
                            .with_section_no(format!("{}{index}", key.number))
                            .with_section_id(record.id.clone())
                            .with_label(format!(
                                "{name_th} {} {SUBSECTION_NAME} {index}",
                                key.label
                            ))
                            .with_content(format!(
                                "{name_th} {}",
                                collapse_whitespace(&subsection.body)
                            ))
                            .with_clause(subsection.clauses())
                            .with_reference(extract_references(&subsection.body, &key.number)?),
                    );
                }
                leaf = leaf.with_children(children);
            }
        }

        Ok(leaf)
    }
}
