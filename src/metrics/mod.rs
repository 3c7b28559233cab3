//! Binary-classification metric primitives.
//!
//! Scalar metrics are computed in `f64` regardless of the `f32` prediction
//! type. ROC-AUC uses the tie-corrected rank statistic (tied score pairs
//! count half), so a constant predictor scores 0.5 independent of input
//! order. AUC-PR integrates the recall-sorted precision-recall curve with
//! the trapezoidal rule, since raw curve output order is not guaranteed
//! monotonic.

pub mod aggregate;
pub mod fold;

pub use aggregate::{aggregate, AggregatedMetrics};
pub use fold::{evaluate_fold, FoldMetrics, SplitEvaluation};

use crate::core::constants::PROB_CLIP_EPSILON;
use crate::core::error::{Result, SleepStageError};
use crate::core::types::{Label, Score};
use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};
use std::ops::Add;

/// 2×2 confusion counts for binary classification.
///
/// Matrix layout is `[[TN, FP], [FN, TP]]`: rows are actual classes,
/// columns predicted classes, negative class first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionCounts {
    /// True negatives
    pub tn: u64,
    /// False positives
    pub fp: u64,
    /// False negatives
    pub fn_: u64,
    /// True positives
    pub tp: u64,
}

impl ConfusionCounts {
    /// Tally counts from hard predictions and targets.
    pub fn from_predictions(
        predictions: &ArrayView1<'_, Label>,
        targets: &ArrayView1<'_, Label>,
    ) -> Self {
        let mut counts = ConfusionCounts::default();
        for (&pred, &target) in predictions.iter().zip(targets.iter()) {
            let predicted_positive = pred >= 0.5;
            let actual_positive = target >= 0.5;
            match (actual_positive, predicted_positive) {
                (true, true) => counts.tp += 1,
                (false, true) => counts.fp += 1,
                (false, false) => counts.tn += 1,
                (true, false) => counts.fn_ += 1,
            }
        }
        counts
    }

    /// The counts as a `[[TN, FP], [FN, TP]]` matrix.
    pub fn matrix(&self) -> [[u64; 2]; 2] {
        [[self.tn, self.fp], [self.fn_, self.tp]]
    }

    /// Total number of samples counted.
    pub fn total(&self) -> u64 {
        self.tn + self.fp + self.fn_ + self.tp
    }

    /// Fraction of correct predictions.
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            (self.tp + self.tn) as f64 / total as f64
        }
    }

    /// TP / (TP + FP), 0 when no positive predictions.
    pub fn precision(&self) -> f64 {
        let denom = self.tp + self.fp;
        if denom == 0 {
            0.0
        } else {
            self.tp as f64 / denom as f64
        }
    }

    /// TP / (TP + FN), 0 when no actual positives.
    pub fn recall(&self) -> f64 {
        let denom = self.tp + self.fn_;
        if denom == 0 {
            0.0
        } else {
            self.tp as f64 / denom as f64
        }
    }

    /// Harmonic mean of precision and recall, 0 when both are 0.
    pub fn f1(&self) -> f64 {
        let precision = self.precision();
        let recall = self.recall();
        if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        }
    }

    /// Matthews correlation coefficient, defined as 0 when the denominator
    /// vanishes (any marginal count is zero).
    pub fn matthews_corrcoef(&self) -> f64 {
        let tp = self.tp as f64;
        let tn = self.tn as f64;
        let fp = self.fp as f64;
        let fn_ = self.fn_ as f64;
        let denominator = ((tp + fp) * (tp + fn_) * (tn + fp) * (tn + fn_)).sqrt();
        if denominator == 0.0 {
            0.0
        } else {
            (tp * tn - fp * fn_) / denominator
        }
    }
}

impl Add for ConfusionCounts {
    type Output = ConfusionCounts;

    fn add(self, other: ConfusionCounts) -> ConfusionCounts {
        ConfusionCounts {
            tn: self.tn + other.tn,
            fp: self.fp + other.fp,
            fn_: self.fn_ + other.fn_,
            tp: self.tp + other.tp,
        }
    }
}

/// Area under the ROC curve via the tie-corrected rank statistic.
///
/// Equivalent to the probability that a random positive outranks a random
/// negative, with tied scores counting half. Errors with a degenerate-fold
/// condition when the label vector is empty or single-class, where the
/// statistic is undefined.
pub fn roc_auc(scores: &ArrayView1<'_, Score>, targets: &ArrayView1<'_, Label>) -> Result<f64> {
    if scores.len() != targets.len() {
        return Err(SleepStageError::dimension_mismatch(
            format!("scores: {}", scores.len()),
            format!("targets: {}", targets.len()),
        ));
    }
    if targets.is_empty() {
        return Err(SleepStageError::degenerate_fold("empty label vector"));
    }

    let mut pairs: Vec<(Score, bool)> = scores
        .iter()
        .zip(targets.iter())
        .map(|(&score, &target)| (score, target >= 0.5))
        .collect();
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut ranked_pairs = 0.0_f64;
    let mut tied_pairs = 0.0_f64;
    let mut negatives_below = 0.0_f64;
    let mut index = 0;
    while index < pairs.len() {
        let score = pairs[index].0;
        let mut group_pos = 0.0_f64;
        let mut group_neg = 0.0_f64;
        while index < pairs.len() && pairs[index].0 == score {
            if pairs[index].1 {
                group_pos += 1.0;
            } else {
                group_neg += 1.0;
            }
            index += 1;
        }
        ranked_pairs += group_pos * negatives_below;
        tied_pairs += group_pos * group_neg;
        negatives_below += group_neg;
    }

    let positives: f64 = pairs.iter().filter(|&&(_, positive)| positive).count() as f64;
    let negatives = pairs.len() as f64 - positives;
    if positives == 0.0 || negatives == 0.0 {
        return Err(SleepStageError::degenerate_fold(
            "labels contain a single class; ROC-AUC is undefined",
        ));
    }
    Ok((ranked_pairs + 0.5 * tied_pairs) / (positives * negatives))
}

/// Binary cross-entropy with probabilities clipped to `[ε, 1−ε]`.
pub fn log_loss(probabilities: &ArrayView1<'_, Score>, targets: &ArrayView1<'_, Label>) -> f64 {
    if probabilities.is_empty() {
        return 0.0;
    }
    let eps = PROB_CLIP_EPSILON;
    let total: f64 = probabilities
        .iter()
        .zip(targets.iter())
        .map(|(&proba, &target)| {
            let p = (proba as f64).clamp(eps, 1.0 - eps);
            let y = target as f64;
            -(y * p.ln() + (1.0 - y) * (1.0 - p).ln())
        })
        .sum();
    total / probabilities.len() as f64
}

/// Precision-recall curve points as `(recall, precision)` pairs, one per
/// distinct score threshold, descending, plus the terminal `(0, 1)` point.
///
/// Errors with a degenerate-fold condition when there are no positives.
pub fn precision_recall_curve(
    scores: &ArrayView1<'_, Score>,
    targets: &ArrayView1<'_, Label>,
) -> Result<Vec<(f64, f64)>> {
    if scores.len() != targets.len() {
        return Err(SleepStageError::dimension_mismatch(
            format!("scores: {}", scores.len()),
            format!("targets: {}", targets.len()),
        ));
    }
    let mut pairs: Vec<(Score, bool)> = scores
        .iter()
        .zip(targets.iter())
        .map(|(&score, &target)| (score, target >= 0.5))
        .collect();
    pairs.sort_by(|a, b| b.0.total_cmp(&a.0));

    let positives = pairs.iter().filter(|&&(_, positive)| positive).count() as f64;
    if positives == 0.0 {
        return Err(SleepStageError::degenerate_fold(
            "no positive labels; precision-recall curve is undefined",
        ));
    }

    let mut points = Vec::new();
    let mut tp = 0.0_f64;
    let mut fp = 0.0_f64;
    let mut index = 0;
    while index < pairs.len() {
        let score = pairs[index].0;
        while index < pairs.len() && pairs[index].0 == score {
            if pairs[index].1 {
                tp += 1.0;
            } else {
                fp += 1.0;
            }
            index += 1;
        }
        points.push((tp / positives, tp / (tp + fp)));
    }
    points.push((0.0, 1.0));
    Ok(points)
}

/// Area under a curve by sorting points on x (breaking ties on y) and
/// applying the trapezoidal rule. Input order does not affect the result.
pub fn auc_trapezoid_sorted(points: &[(f64, f64)]) -> f64 {
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));
    sorted
        .windows(2)
        .map(|pair| (pair[1].0 - pair[0].0) * (pair[0].1 + pair[1].1) / 2.0)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::Array1;

    #[test]
    fn test_confusion_counts() {
        let predictions = Array1::from_vec(vec![1.0, 0.0, 1.0, 0.0, 1.0]);
        let targets = Array1::from_vec(vec![1.0, 0.0, 0.0, 1.0, 1.0]);
        let counts = ConfusionCounts::from_predictions(&predictions.view(), &targets.view());
        assert_eq!(counts.tp, 2);
        assert_eq!(counts.tn, 1);
        assert_eq!(counts.fp, 1);
        assert_eq!(counts.fn_, 1);
        assert_eq!(counts.matrix(), [[1, 1], [1, 2]]);
    }

    #[test]
    fn test_perfect_scalar_metrics() {
        let counts = ConfusionCounts { tn: 10, fp: 0, fn_: 0, tp: 10 };
        assert_abs_diff_eq!(counts.accuracy(), 1.0);
        assert_abs_diff_eq!(counts.precision(), 1.0);
        assert_abs_diff_eq!(counts.recall(), 1.0);
        assert_abs_diff_eq!(counts.f1(), 1.0);
        assert_abs_diff_eq!(counts.matthews_corrcoef(), 1.0);
    }

    #[test]
    fn test_mcc_zero_denominator_convention() {
        // Only true positives: every marginal involving TN is zero.
        let counts = ConfusionCounts { tn: 0, fp: 0, fn_: 0, tp: 5 };
        assert_eq!(counts.matthews_corrcoef(), 0.0);
    }

    #[test]
    fn test_zero_division_conventions() {
        let counts = ConfusionCounts { tn: 5, fp: 0, fn_: 0, tp: 0 };
        assert_eq!(counts.precision(), 0.0);
        assert_eq!(counts.recall(), 0.0);
        assert_eq!(counts.f1(), 0.0);
    }

    #[test]
    fn test_roc_auc_perfect_separation() {
        let scores = Array1::from_vec(vec![0.9, 0.8, 0.3, 0.1]);
        let targets = Array1::from_vec(vec![1.0, 1.0, 0.0, 0.0]);
        let auc = roc_auc(&scores.view(), &targets.view()).unwrap();
        assert_abs_diff_eq!(auc, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_roc_auc_constant_scores_is_half() {
        let scores = Array1::from_vec(vec![0.5; 8]);
        let targets = Array1::from_vec(vec![1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0]);
        let auc = roc_auc(&scores.view(), &targets.view()).unwrap();
        assert_abs_diff_eq!(auc, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_roc_auc_single_class_is_degenerate() {
        let scores = Array1::from_vec(vec![0.2, 0.8]);
        let targets = Array1::from_vec(vec![1.0, 1.0]);
        let err = roc_auc(&scores.view(), &targets.view()).unwrap_err();
        assert_eq!(err.category(), "degenerate_fold");
    }

    #[test]
    fn test_log_loss_confident_correct_is_small() {
        let probabilities = Array1::from_vec(vec![0.99, 0.99, 0.01, 0.01]);
        let targets = Array1::from_vec(vec![1.0, 1.0, 0.0, 0.0]);
        let loss = log_loss(&probabilities.view(), &targets.view());
        assert!(loss < 0.05);
    }

    #[test]
    fn test_log_loss_clips_extremes() {
        let probabilities = Array1::from_vec(vec![0.0, 1.0]);
        let targets = Array1::from_vec(vec![1.0, 0.0]);
        let loss = log_loss(&probabilities.view(), &targets.view());
        assert!(loss.is_finite());
    }

    #[test]
    fn test_pr_curve_ends_at_full_recall() {
        let scores = Array1::from_vec(vec![0.9, 0.6, 0.4, 0.2]);
        let targets = Array1::from_vec(vec![1.0, 0.0, 1.0, 0.0]);
        let points = precision_recall_curve(&scores.view(), &targets.view()).unwrap();
        // Highest-recall point covers every positive.
        let max_recall = points.iter().map(|&(r, _)| r).fold(0.0, f64::max);
        assert_abs_diff_eq!(max_recall, 1.0);
        // Terminal point (0, 1) present.
        assert!(points.contains(&(0.0, 1.0)));
    }

    #[test]
    fn test_pr_curve_length_mismatch_rejected() {
        let scores = Array1::from_vec(vec![0.9, 0.6, 0.4]);
        let targets = Array1::from_vec(vec![1.0, 0.0]);
        let err = precision_recall_curve(&scores.view(), &targets.view()).unwrap_err();
        assert_eq!(err.category(), "dimension_mismatch");
    }

    #[test]
    fn test_trapezoid_order_invariance() {
        let forward = vec![(0.0, 1.0), (0.5, 0.8), (1.0, 0.4)];
        let mut shuffled = forward.clone();
        shuffled.swap(0, 2);
        let a = auc_trapezoid_sorted(&forward);
        let b = auc_trapezoid_sorted(&shuffled);
        assert_abs_diff_eq!(a, b, epsilon = 1e-9);
        assert_abs_diff_eq!(a, 0.5 * (1.0 + 0.8) / 2.0 + 0.5 * (0.8 + 0.4) / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_confusion_counts_sum() {
        let a = ConfusionCounts { tn: 1, fp: 2, fn_: 3, tp: 4 };
        let b = ConfusionCounts { tn: 10, fp: 20, fn_: 30, tp: 40 };
        let pooled = a + b;
        assert_eq!(pooled, ConfusionCounts { tn: 11, fp: 22, fn_: 33, tp: 44 });
    }
}
