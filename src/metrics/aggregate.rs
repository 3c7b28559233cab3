//! Cross-fold aggregation.
//!
//! Scalar metrics are averaged with equal weight per fold regardless of
//! fold size; confusion counts are pooled by element-wise summation. The
//! two views answer different questions and are reported side by side.

use crate::core::error::{Result, SleepStageError};
use crate::metrics::{ConfusionCounts, FoldMetrics};
use serde::{Deserialize, Serialize};

/// Equal-weight means of the scalar metrics plus pooled confusion counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedMetrics {
    /// Mean accuracy across folds
    pub accuracy: f64,
    /// Mean ROC-AUC across folds
    pub roc_auc: f64,
    /// Mean precision across folds
    pub precision: f64,
    /// Mean recall across folds
    pub recall: f64,
    /// Mean F1 across folds
    pub f1: f64,
    /// Mean log-loss across folds
    pub log_loss: f64,
    /// Mean AUC-PR across folds
    pub auc_pr: f64,
    /// Mean MCC across folds
    pub mcc: f64,
    /// Element-wise sum of per-fold confusion counts
    pub confusion: ConfusionCounts,
    /// Number of folds that contributed
    pub folds: usize,
}

/// Aggregate per-fold metric panels.
///
/// Errors when the slice is empty, which happens when every fold was
/// skipped as degenerate.
pub fn aggregate(folds: &[FoldMetrics]) -> Result<AggregatedMetrics> {
    if folds.is_empty() {
        return Err(SleepStageError::config(
            "no valid folds to aggregate; every fold was skipped",
        ));
    }
    let n = folds.len() as f64;
    let mut confusion = ConfusionCounts::default();
    let mut sums = [0.0_f64; 8];
    for fold in folds {
        sums[0] += fold.accuracy;
        sums[1] += fold.roc_auc;
        sums[2] += fold.precision;
        sums[3] += fold.recall;
        sums[4] += fold.f1;
        sums[5] += fold.log_loss;
        sums[6] += fold.auc_pr;
        sums[7] += fold.mcc;
        confusion = confusion + fold.confusion;
    }
    Ok(AggregatedMetrics {
        accuracy: sums[0] / n,
        roc_auc: sums[1] / n,
        precision: sums[2] / n,
        recall: sums[3] / n,
        f1: sums[4] / n,
        log_loss: sums[5] / n,
        auc_pr: sums[6] / n,
        mcc: sums[7] / n,
        confusion,
        folds: folds.len(),
    })
}
