//! Region×band feature-column selection.

use crate::core::constants::{ANTERIOR_FEATURES, BAND_TOKENS, REGION_TOKENS};

/// Select the feature columns for a training run.
///
/// With `use_all_regions` off, returns the fixed anterior six-band list
/// verbatim, regardless of the table's contents. There is no existence
/// check here; absence surfaces later when the design matrix is built.
///
/// With it on, returns every column name containing at least one region
/// token and at least one band token, preserving the original column order.
/// Never fails; an empty result is treated by the trainer as a
/// configuration error.
pub fn select_features(columns: &[String], use_all_regions: bool) -> Vec<String> {
    if !use_all_regions {
        return ANTERIOR_FEATURES.iter().map(|name| name.to_string()).collect();
    }
    columns
        .iter()
        .filter(|name| {
            REGION_TOKENS.iter().any(|region| name.contains(region))
                && BAND_TOKENS.iter().any(|band| name.contains(band))
        })
        .cloned()
        .collect()
}
