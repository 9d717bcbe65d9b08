//! Level splitter that partitions flat records at one hierarchy level.

use super::registry::HierarchyRegistry;
use super::types::SplitOutcome;
use crate::error::{ParserError, Result};
use crate::types::SectionRecord;

/// Splits a flat record list into marker/group pairs for one hierarchy level.
///
/// Levels are indices into the registry's ordered level list. Records whose
/// type id is not in the registry are dropped during the scan.
#[derive(Debug, Clone, Copy)]
pub struct LevelSplitter<'r> {
    hierarchy: &'r HierarchyRegistry,
}

impl<'r> LevelSplitter<'r> {
    /// Create a new level splitter.
    #[must_use]
    pub fn new(hierarchy: &'r HierarchyRegistry) -> Self {
        Self { hierarchy }
    }

    /// Split `sections` at hierarchy `level`.
    ///
    /// # Arguments
    /// * `sections` - Records in reading order
    /// * `level` - Index of the hierarchy level to split at
    ///
    /// # Returns
    /// * [`SplitOutcome::Split`] when markers of the level are present
    /// * [`SplitOutcome::Absent`] when they are not
    /// * [`SplitOutcome::Exhausted`] when `level` is past the last level
    ///
    /// # Errors
    /// [`ParserError::StructureMismatch`] when the marker and group counts
    /// cannot be reconciled.
    pub fn split<'a>(
        &self,
        sections: &[&'a SectionRecord],
        level: usize,
    ) -> Result<SplitOutcome<'a>> {
        let Some(spec) = self.hierarchy.level(level) else {
            return Ok(SplitOutcome::Exhausted);
        };

        if !sections.iter().any(|record| record.type_id == spec.id) {
            return Ok(SplitOutcome::Absent {
                next_level: level + 1,
                level_name: spec.name.clone(),
            });
        }

        let mut parents = Vec::new();
        let mut children = Vec::new();
        let mut chunk = Vec::new();

        for &record in sections {
            if !self.hierarchy.is_recognized(&record.type_id) {
                tracing::trace!(
                    type_id = %record.type_id,
                    label = %record.label,
                    "Skipping unrecognised section type"
                );
                continue;
            }

            if record.type_id == spec.id {
                if !chunk.is_empty() {
                    children.push(std::mem::take(&mut chunk));
                }
                parents.push(record);
            } else {
                chunk.push(record);
            }
        }
        children.push(chunk);

        let leading = if children.len() == parents.len() + 1 {
            Some(children.remove(0))
        } else {
            None
        };

        if parents.len() != children.len() {
            return Err(ParserError::StructureMismatch {
                level: spec.name.clone(),
                parents: parents.len(),
                children: children.len(),
                marker: parents
                    .first()
                    .map(|record| record.label.clone())
                    .unwrap_or_default(),
            });
        }

        tracing::debug!(
            level = %spec.name,
            parents = parents.len(),
            leading = leading.as_ref().map_or(0, Vec::len),
            "Split level"
        );

        Ok(SplitOutcome::Split {
            parents,
            children,
            next_level: level + 1,
            level_name: spec.name.clone(),
            leading,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::splitting::create_thai_law_hierarchy;

    fn record(type_id: &str, label: &str) -> SectionRecord {
        SectionRecord::new(type_id, label, "", label)
    }

    fn labels(records: &[&SectionRecord]) -> Vec<String> {
        records.iter().map(|record| record.label.clone()).collect()
    }

    #[test]
    fn test_split_chapters() {
        let hierarchy = create_thai_law_hierarchy();
        let splitter = LevelSplitter::new(&hierarchy);
        let records = vec![
            record("8", "หมวด 1"),
            record("4", "มาตรา 1"),
            record("4", "มาตรา 2"),
            record("8", "หมวด 2"),
            record("4", "มาตรา 3"),
        ];
        let refs: Vec<&SectionRecord> = records.iter().collect();

        // Level 3 is หมวด: บรรพ, ภาค, ลักษณะ come first.
        let outcome = splitter.split(&refs, 3).unwrap();
        let SplitOutcome::Split {
            parents,
            children,
            next_level,
            level_name,
            leading,
        } = outcome
        else {
            panic!("expected a split");
        };

        assert_eq!(labels(&parents), vec!["หมวด 1", "หมวด 2"]);
        assert_eq!(labels(&children[0]), vec!["มาตรา 1", "มาตรา 2"]);
        assert_eq!(labels(&children[1]), vec!["มาตรา 3"]);
        assert_eq!(next_level, 4);
        assert_eq!(level_name, "หมวด");
        assert!(leading.is_none());
    }

    #[test]
    fn test_split_leading_chunk() {
        let hierarchy = create_thai_law_hierarchy();
        let splitter = LevelSplitter::new(&hierarchy);
        let records = vec![
            record("4", "มาตรา 1"),
            record("8", "หมวด 1"),
            record("4", "มาตรา 2"),
        ];
        let refs: Vec<&SectionRecord> = records.iter().collect();

        let SplitOutcome::Split {
            parents,
            children,
            leading,
            ..
        } = splitter.split(&refs, 3).unwrap()
        else {
            panic!("expected a split");
        };

        assert_eq!(parents.len(), 1);
        assert_eq!(children.len(), 1);
        assert_eq!(labels(&leading.unwrap()), vec!["มาตรา 1"]);
    }

    #[test]
    fn test_split_absent_level() {
        let hierarchy = create_thai_law_hierarchy();
        let splitter = LevelSplitter::new(&hierarchy);
        let records = vec![record("4", "มาตรา 1")];
        let refs: Vec<&SectionRecord> = records.iter().collect();

        let outcome = splitter.split(&refs, 0).unwrap();
        assert_eq!(
            outcome,
            SplitOutcome::Absent {
                next_level: 1,
                level_name: "บรรพ".to_string(),
            }
        );
    }

    #[test]
    fn test_split_exhausted() {
        let hierarchy = create_thai_law_hierarchy();
        let splitter = LevelSplitter::new(&hierarchy);
        let records = vec![record("4", "มาตรา 1")];
        let refs: Vec<&SectionRecord> = records.iter().collect();

        assert_eq!(splitter.split(&refs, 5).unwrap(), SplitOutcome::Exhausted);
    }

    #[test]
    fn test_split_ignores_unrecognised_types() {
        let hierarchy = create_thai_law_hierarchy();
        let splitter = LevelSplitter::new(&hierarchy);
        let records = vec![
            record("8", "หมวด 1"),
            record("99", "noise"),
            record("4", "มาตรา 1"),
        ];
        let refs: Vec<&SectionRecord> = records.iter().collect();

        let SplitOutcome::Split { children, .. } = splitter.split(&refs, 3).unwrap() else {
            panic!("expected a split");
        };
        assert_eq!(labels(&children[0]), vec!["มาตรา 1"]);
    }

    #[test]
    fn test_split_consecutive_markers_is_mismatch() {
        let hierarchy = create_thai_law_hierarchy();
        let splitter = LevelSplitter::new(&hierarchy);
        let records = vec![
            record("8", "หมวด 1"),
            record("8", "หมวด 2"),
            record("4", "มาตรา 1"),
        ];
        let refs: Vec<&SectionRecord> = records.iter().collect();

        let err = splitter.split(&refs, 3).unwrap_err();
        match err {
            ParserError::StructureMismatch {
                level,
                parents,
                children,
                marker,
            } => {
                assert_eq!(level, "หมวด");
                assert_eq!(parents, 2);
                assert_eq!(children, 1);
                assert_eq!(marker, "หมวด 1");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_split_trailing_marker_gets_empty_group() {
        let hierarchy = create_thai_law_hierarchy();
        let splitter = LevelSplitter::new(&hierarchy);
        let records = vec![
            record("8", "หมวด 1"),
            record("4", "มาตรา 1"),
            record("8", "หมวด 2"),
        ];
        let refs: Vec<&SectionRecord> = records.iter().collect();

        let SplitOutcome::Split { children, .. } = splitter.split(&refs, 3).unwrap() else {
            panic!("expected a split");
        };
        assert_eq!(children.len(), 2);
        assert!(children[1].is_empty());
    }
}
