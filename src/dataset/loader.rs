//! CSV loader for labelled power-band feature tables.
//!
//! The preprocessing collaborators emit headered CSVs with an `epochId`
//! column, a `sleep_stage` column, and one numeric column per region×band
//! feature. This loader turns such a file into a [`FeatureTable`].

use crate::core::constants::{EPOCH_ID_COLUMN, STAGE_COLUMN};
use crate::core::error::{Result, SleepStageError};
use crate::core::types::Score;
use crate::dataset::{FeatureTable, TableMetadata};
use csv::ReaderBuilder;
use ndarray::Array2;
use std::path::Path;

/// CSV table loader.
#[derive(Debug, Clone)]
pub struct CsvTableLoader {
    /// Field delimiter
    delimiter: u8,
}

impl Default for CsvTableLoader {
    fn default() -> Self {
        CsvTableLoader { delimiter: b',' }
    }
}

impl CsvTableLoader {
    /// Create a loader with the default comma delimiter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Load a headered CSV file into a [`FeatureTable`].
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<FeatureTable> {
        let path = path.as_ref();
        log::info!("loading feature table from {}", path.display());

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(self.delimiter)
            .trim(csv::Trim::All)
            .from_path(path)?;

        let headers = reader.headers()?.clone();
        let epoch_col = headers
            .iter()
            .position(|name| name == EPOCH_ID_COLUMN)
            .ok_or_else(|| {
                SleepStageError::dataset(format!("missing {:?} column", EPOCH_ID_COLUMN))
            })?;
        let stage_col = headers
            .iter()
            .position(|name| name == STAGE_COLUMN)
            .ok_or_else(|| {
                SleepStageError::dataset(format!("missing {:?} column", STAGE_COLUMN))
            })?;

        let feature_cols: Vec<usize> = (0..headers.len())
            .filter(|&col| col != epoch_col && col != stage_col)
            .collect();
        let feature_names: Vec<String> = feature_cols
            .iter()
            .map(|&col| headers[col].to_string())
            .collect();

        let mut epoch_ids = Vec::new();
        let mut stages = Vec::new();
        let mut values: Vec<Score> = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record?;
            if record.len() != headers.len() {
                return Err(SleepStageError::dataset(format!(
                    "row {}: expected {} fields, got {}",
                    row + 1,
                    headers.len(),
                    record.len()
                )));
            }
            epoch_ids.push(record[epoch_col].to_string());
            stages.push(record[stage_col].to_string());
            for &col in &feature_cols {
                let field = &record[col];
                let value: Score = field.parse().map_err(|_| {
                    SleepStageError::dataset(format!(
                        "row {}, column {:?}: cannot parse {:?} as a number",
                        row + 1,
                        headers[col].to_string(),
                        field
                    ))
                })?;
                values.push(value);
            }
        }

        let num_rows = epoch_ids.len();
        let features = Array2::from_shape_vec((num_rows, feature_names.len()), values)
            .map_err(|err| SleepStageError::dataset(format!("feature matrix shape: {}", err)))?;

        let mut table = FeatureTable::new(epoch_ids, stages, feature_names, features)?;
        table.set_metadata(TableMetadata {
            name: path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| "untitled".to_string()),
            created_at: chrono::Utc::now(),
            source_path: Some(path.display().to_string()),
        });
        log::info!(
            "loaded {} epochs x {} feature columns",
            table.num_rows(),
            table.feature_names().len()
        );
        Ok(table)
    }
}
