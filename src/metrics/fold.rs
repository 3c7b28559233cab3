//! Per-fold evaluation: fit a model on the training split and compute the
//! full metric panel on both splits.

use crate::core::error::Result;
use crate::core::traits::BinaryClassifier;
use crate::core::types::{Label, Score};
use crate::metrics::{
    auc_trapezoid_sorted, log_loss, precision_recall_curve, roc_auc, ConfusionCounts,
};
use ndarray::{ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

/// Complete metric panel for a single data split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoldMetrics {
    /// Fraction of correct hard predictions
    pub accuracy: f64,
    /// Tie-corrected area under the ROC curve
    pub roc_auc: f64,
    /// Positive predictive value
    pub precision: f64,
    /// True positive rate
    pub recall: f64,
    /// Harmonic mean of precision and recall
    pub f1: f64,
    /// Clipped binary cross-entropy
    pub log_loss: f64,
    /// Trapezoidal area under the precision-recall curve
    pub auc_pr: f64,
    /// Matthews correlation coefficient
    pub mcc: f64,
    /// Raw confusion counts
    pub confusion: ConfusionCounts,
}

impl FoldMetrics {
    /// Compute the panel from hard predictions, positive-class
    /// probabilities, and targets.
    ///
    /// Errors with a degenerate-fold condition when the targets are empty
    /// or single-class, since ranking metrics are undefined there.
    pub fn from_predictions(
        hard: &ArrayView1<'_, Label>,
        proba: &ArrayView1<'_, Score>,
        targets: &ArrayView1<'_, Label>,
    ) -> Result<Self> {
        let confusion = ConfusionCounts::from_predictions(hard, targets);
        let roc = roc_auc(proba, targets)?;
        let curve = precision_recall_curve(proba, targets)?;
        Ok(FoldMetrics {
            accuracy: confusion.accuracy(),
            roc_auc: roc,
            precision: confusion.precision(),
            recall: confusion.recall(),
            f1: confusion.f1(),
            log_loss: log_loss(proba, targets),
            auc_pr: auc_trapezoid_sorted(&curve),
            mcc: confusion.matthews_corrcoef(),
            confusion,
        })
    }
}

/// Train- and test-split metric panels for one fold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitEvaluation {
    /// Metrics on the data the model was fit on
    pub train: FoldMetrics,
    /// Metrics on the held-out data
    pub test: FoldMetrics,
}

/// Fit `model` on the training split and evaluate both splits.
pub fn evaluate_fold<M: BinaryClassifier + ?Sized>(
    model: &mut M,
    x_train: ArrayView2<'_, Score>,
    y_train: ArrayView1<'_, Label>,
    x_test: ArrayView2<'_, Score>,
    y_test: ArrayView1<'_, Label>,
) -> Result<SplitEvaluation> {
    model.fit(x_train, y_train)?;

    let train_hard = model.predict(x_train)?;
    let train_proba = model.predict_positive_proba(x_train)?;
    let train = FoldMetrics::from_predictions(&train_hard.view(), &train_proba.view(), &y_train)?;

    let test_hard = model.predict(x_test)?;
    let test_proba = model.predict_positive_proba(x_test)?;
    let test = FoldMetrics::from_predictions(&test_hard.view(), &test_proba.view(), &y_test)?;

    Ok(SplitEvaluation { train, test })
}
