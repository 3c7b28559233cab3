//! Labelled feature-table management.
//!
//! A [`FeatureTable`] holds one row per EEG epoch: the epoch key, the raw
//! sleep-stage code, and the named region×band power features produced by the
//! upstream preprocessing collaborators. The table is immutable; filtering
//! and sampling produce new tables.

pub mod features;
pub mod labels;
pub mod loader;
pub mod subjects;

pub use features::select_features;
pub use labels::{binary_label, is_scored};
pub use loader::CsvTableLoader;
pub use subjects::{row_subjects, unique_subjects, SubjectId};

use crate::core::constants::{EPOCH_ID_COLUMN, STAGE_COLUMN};
use crate::core::error::{Result, SleepStageError};
use crate::core::types::{Label, Score};
use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Table provenance metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableMetadata {
    /// Table name
    pub name: String,
    /// Creation timestamp
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Source file path, when loaded from disk
    pub source_path: Option<String>,
}

impl Default for TableMetadata {
    fn default() -> Self {
        TableMetadata {
            name: "untitled".to_string(),
            created_at: chrono::Utc::now(),
            source_path: None,
        }
    }
}

/// Labelled power-band feature table, one row per epoch.
#[derive(Debug, Clone)]
pub struct FeatureTable {
    /// Epoch key per row (`<prefix>-<suffix>-...`)
    epoch_ids: Vec<String>,
    /// Raw sleep-stage code per row
    stages: Vec<String>,
    /// Feature column names, in table order
    feature_names: Vec<String>,
    /// Feature matrix (rows × feature columns)
    features: Array2<Score>,
    /// Column-name → column-index lookup
    column_index: HashMap<String, usize>,
    /// Provenance metadata
    metadata: TableMetadata,
}

impl FeatureTable {
    /// Create a table from parallel row vectors and a feature matrix.
    pub fn new(
        epoch_ids: Vec<String>,
        stages: Vec<String>,
        feature_names: Vec<String>,
        features: Array2<Score>,
    ) -> Result<Self> {
        let num_rows = features.nrows();
        if epoch_ids.len() != num_rows {
            return Err(SleepStageError::dimension_mismatch(
                format!("feature rows: {}", num_rows),
                format!("epoch ids: {}", epoch_ids.len()),
            ));
        }
        if stages.len() != num_rows {
            return Err(SleepStageError::dimension_mismatch(
                format!("feature rows: {}", num_rows),
                format!("stage labels: {}", stages.len()),
            ));
        }
        if feature_names.len() != features.ncols() {
            return Err(SleepStageError::dimension_mismatch(
                format!("feature columns: {}", features.ncols()),
                format!("feature names: {}", feature_names.len()),
            ));
        }
        let column_index = feature_names
            .iter()
            .enumerate()
            .map(|(index, name)| (name.clone(), index))
            .collect::<HashMap<_, _>>();
        if column_index.len() != feature_names.len() {
            return Err(SleepStageError::dataset("duplicate feature column name"));
        }
        if column_index.contains_key(EPOCH_ID_COLUMN) || column_index.contains_key(STAGE_COLUMN) {
            return Err(SleepStageError::dataset(format!(
                "{:?} and {:?} are reserved column names",
                EPOCH_ID_COLUMN, STAGE_COLUMN
            )));
        }

        Ok(FeatureTable {
            epoch_ids,
            stages,
            feature_names,
            features,
            column_index,
            metadata: TableMetadata::default(),
        })
    }

    /// Number of epoch rows.
    pub fn num_rows(&self) -> usize {
        self.features.nrows()
    }

    /// Feature column names in table order.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Epoch keys, one per row.
    pub fn epoch_ids(&self) -> &[String] {
        &self.epoch_ids
    }

    /// Raw stage codes, one per row.
    pub fn stages(&self) -> &[String] {
        &self.stages
    }

    /// Table metadata.
    pub fn metadata(&self) -> &TableMetadata {
        &self.metadata
    }

    /// Replace the table metadata.
    pub fn set_metadata(&mut self, metadata: TableMetadata) {
        self.metadata = metadata;
    }

    /// Keep only the rows whose stage is a scored code, dropping the
    /// unscored sentinels (`N`, `?`, `M`).
    pub fn retain_scored(&self) -> FeatureTable {
        let rows: Vec<usize> = (0..self.num_rows())
            .filter(|&row| is_scored(&self.stages[row]))
            .collect();
        self.select_rows(&rows)
    }

    /// Seeded fractional down-sampling without replacement.
    ///
    /// Keeps `round(fraction * rows)` rows, chosen by a seeded shuffle, in
    /// their original relative order so subject enumeration stays stable.
    pub fn subsample(&self, fraction: f64, seed: u64) -> Result<FeatureTable> {
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(SleepStageError::config(format!(
                "subsample fraction must be in (0, 1], got {}",
                fraction
            )));
        }
        if self.num_rows() == 0 {
            return Err(SleepStageError::dataset("no rows to subsample"));
        }
        let keep = ((self.num_rows() as f64) * fraction).round() as usize;
        let keep = keep.clamp(1, self.num_rows());

        let mut rows: Vec<usize> = (0..self.num_rows()).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        rows.shuffle(&mut rng);
        rows.truncate(keep);
        rows.sort_unstable();
        Ok(self.select_rows(&rows))
    }

    /// Build the design matrix for the named feature columns, all rows.
    ///
    /// Errors when a requested column is absent. The fixed anterior feature
    /// list is returned verbatim by the selector, so a table lacking those
    /// columns surfaces here as a dataset error.
    pub fn design_matrix(&self, columns: &[String]) -> Result<Array2<Score>> {
        let mut indices = Vec::with_capacity(columns.len());
        for name in columns {
            match self.column_index.get(name) {
                Some(&index) => indices.push(index),
                None => {
                    return Err(SleepStageError::dataset(format!(
                        "feature column {:?} not present in table",
                        name
                    )))
                }
            }
        }
        Ok(self.features.select(Axis(1), &indices))
    }

    /// Binary target vector: 1 for N1/N2 stages, 0 otherwise.
    ///
    /// Assumes unscored sentinel rows were already removed via
    /// [`FeatureTable::retain_scored`].
    pub fn binary_labels(&self) -> Array1<Label> {
        Array1::from_iter(self.stages.iter().map(|stage| binary_label(stage)))
    }

    /// New table containing only the given rows, metadata carried over.
    pub(crate) fn select_rows(&self, rows: &[usize]) -> FeatureTable {
        FeatureTable {
            epoch_ids: rows.iter().map(|&row| self.epoch_ids[row].clone()).collect(),
            stages: rows.iter().map(|&row| self.stages[row].clone()).collect(),
            feature_names: self.feature_names.clone(),
            features: self.features.select(Axis(0), rows),
            column_index: self.column_index.clone(),
            metadata: self.metadata.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn sample_table() -> FeatureTable {
        FeatureTable::new(
            vec![
                "A12-034-0".to_string(),
                "A12-034-1".to_string(),
                "B07-101-0".to_string(),
                "B07-101-1".to_string(),
            ],
            vec![
                "1".to_string(),
                "W".to_string(),
                "N".to_string(),
                "2".to_string(),
            ],
            vec!["anterior_delta".to_string(), "anterior_theta".to_string()],
            array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0], [7.0, 8.0]],
        )
        .unwrap()
    }

    #[test]
    fn test_dimension_validation() {
        let result = FeatureTable::new(
            vec!["A-1".to_string()],
            vec!["1".to_string(), "2".to_string()],
            vec!["anterior_delta".to_string()],
            array![[1.0]],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let result = FeatureTable::new(
            vec!["A-1".to_string()],
            vec!["1".to_string()],
            vec!["anterior_delta".to_string(), "anterior_delta".to_string()],
            array![[1.0, 2.0]],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_retain_scored_drops_sentinels() {
        let table = sample_table();
        let scored = table.retain_scored();
        assert_eq!(scored.num_rows(), 3);
        assert!(scored.stages().iter().all(|stage| stage != "N"));
        // Row order preserved
        assert_eq!(scored.epoch_ids()[0], "A12-034-0");
        assert_eq!(scored.epoch_ids()[2], "B07-101-1");
    }

    #[test]
    fn test_binary_labels() {
        let scored = sample_table().retain_scored();
        let labels = scored.binary_labels();
        assert_eq!(labels.to_vec(), vec![1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_design_matrix_column_order() {
        let table = sample_table();
        let matrix = table
            .design_matrix(&["anterior_theta".to_string(), "anterior_delta".to_string()])
            .unwrap();
        assert_eq!(matrix[[0, 0]], 2.0);
        assert_eq!(matrix[[0, 1]], 1.0);
    }

    #[test]
    fn test_design_matrix_missing_column() {
        let table = sample_table();
        let result = table.design_matrix(&["anterior_gamma".to_string()]);
        assert!(matches!(result, Err(SleepStageError::Dataset { .. })));
    }

    #[test]
    fn test_subsample_reproducible() {
        let table = sample_table();
        let first = table.subsample(0.5, 7).unwrap();
        let second = table.subsample(0.5, 7).unwrap();
        assert_eq!(first.num_rows(), 2);
        assert_eq!(first.epoch_ids(), second.epoch_ids());
    }

    #[test]
    fn test_subsample_empty_table_is_error() {
        // A table of only unscored sentinels is empty after filtering;
        // sampling it must error, not panic in the row-count clamp.
        let table = FeatureTable::new(
            vec!["A12-034-0".to_string(), "A12-034-1".to_string()],
            vec!["N".to_string(), "?".to_string()],
            vec!["anterior_delta".to_string()],
            array![[1.0], [2.0]],
        )
        .unwrap();
        let scored = table.retain_scored();
        assert_eq!(scored.num_rows(), 0);
        let result = scored.subsample(0.35, 42);
        assert!(matches!(result, Err(SleepStageError::Dataset { .. })));
    }

    #[test]
    fn test_subsample_rejects_bad_fraction() {
        let table = sample_table();
        assert!(table.subsample(0.0, 1).is_err());
        assert!(table.subsample(1.2, 1).is_err());
    }
}
