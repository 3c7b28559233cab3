//! Subject identity derivation and enumeration.
//!
//! Epoch keys have the form `<prefix>-<suffix>-...`; the subject identifier
//! is the first character of the prefix concatenated with the full second
//! component (`"A12-034-x"` → `"A034"`). Subjects group epochs for
//! leave-one-subject-out partitioning.

use crate::core::error::{Result, SleepStageError};
use crate::dataset::FeatureTable;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Derived subject identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubjectId(String);

impl SubjectId {
    /// Derive the subject identifier from an epoch key.
    pub fn parse(epoch_id: &str) -> Result<SubjectId> {
        let mut components = epoch_id.split('-');
        let prefix = components.next().unwrap_or("");
        let Some(suffix) = components.next() else {
            return Err(SleepStageError::malformed_key(
                epoch_id,
                "expected at least two hyphen-delimited components",
            ));
        };
        let Some(initial) = prefix.chars().next() else {
            return Err(SleepStageError::malformed_key(
                epoch_id,
                "first component is empty",
            ));
        };
        let mut id = String::with_capacity(initial.len_utf8() + suffix.len());
        id.push(initial);
        id.push_str(suffix);
        Ok(SubjectId(id))
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derive the subject identifier for every row of a table.
pub fn row_subjects(table: &FeatureTable) -> Result<Vec<SubjectId>> {
    table.epoch_ids().iter().map(|id| SubjectId::parse(id)).collect()
}

/// Distinct subjects in first-seen row order.
///
/// Enumeration order is deterministic for a given table; fold indexing in
/// cross-validation follows it.
pub fn unique_subjects(per_row: &[SubjectId]) -> Vec<SubjectId> {
    let mut seen = HashSet::new();
    let mut subjects = Vec::new();
    for subject in per_row {
        if seen.insert(subject.clone()) {
            subjects.push(subject.clone());
        }
    }
    subjects
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_literal_example() {
        assert_eq!(SubjectId::parse("A12-034-x").unwrap().as_str(), "A034");
    }

    #[test]
    fn test_parse_two_components() {
        assert_eq!(SubjectId::parse("B7-99").unwrap().as_str(), "B99");
    }

    #[test]
    fn test_parse_rejects_missing_separator() {
        let err = SubjectId::parse("A12034").unwrap_err();
        assert_eq!(err.category(), "malformed_key");
    }

    #[test]
    fn test_parse_rejects_empty_prefix() {
        let err = SubjectId::parse("-034-x").unwrap_err();
        assert_eq!(err.category(), "malformed_key");
    }

    #[test]
    fn test_unique_subjects_first_seen_order() {
        let per_row: Vec<SubjectId> = ["A12-1", "B07-2", "A12-3", "C01-4", "B07-5"]
            .iter()
            .map(|id| SubjectId::parse(id).unwrap())
            .collect();
        let unique = unique_subjects(&per_row);
        let names: Vec<&str> = unique.iter().map(|s| s.as_str()).collect();
        assert_eq!(names, vec!["A1", "B2", "A3", "C4", "B5"]);
    }

    #[test]
    fn test_unique_subjects_groups_same_subject() {
        let per_row: Vec<SubjectId> = ["A12-034-0", "A12-034-1", "A12-034-2"]
            .iter()
            .map(|id| SubjectId::parse(id).unwrap())
            .collect();
        assert_eq!(unique_subjects(&per_row).len(), 1);
    }
}
