//! Summary report assembly: aggregated train/test metrics, generalization
//! ratios, and a human-readable text rendering.

use crate::core::error::Result;
use crate::metrics::AggregatedMetrics;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::time::Duration;

/// Per-metric test/train ratios. `None` marks a ratio whose train-side
/// denominator is zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricRatios {
    /// test accuracy / train accuracy
    pub accuracy: Option<f64>,
    /// test ROC-AUC / train ROC-AUC
    pub roc_auc: Option<f64>,
    /// test precision / train precision
    pub precision: Option<f64>,
    /// test recall / train recall
    pub recall: Option<f64>,
    /// test F1 / train F1
    pub f1: Option<f64>,
    /// test log-loss / train log-loss
    pub log_loss: Option<f64>,
    /// test AUC-PR / train AUC-PR
    pub auc_pr: Option<f64>,
    /// test MCC / train MCC
    pub mcc: Option<f64>,
}

fn ratio(test: f64, train: f64) -> Option<f64> {
    if train == 0.0 {
        None
    } else {
        Some(test / train)
    }
}

impl MetricRatios {
    /// Compute ratios from aggregated train and test panels.
    pub fn from_aggregates(train: &AggregatedMetrics, test: &AggregatedMetrics) -> Self {
        MetricRatios {
            accuracy: ratio(test.accuracy, train.accuracy),
            roc_auc: ratio(test.roc_auc, train.roc_auc),
            precision: ratio(test.precision, train.precision),
            recall: ratio(test.recall, train.recall),
            f1: ratio(test.f1, train.f1),
            log_loss: ratio(test.log_loss, train.log_loss),
            auc_pr: ratio(test.auc_pr, train.auc_pr),
            mcc: ratio(test.mcc, train.mcc),
        }
    }
}

/// Final training report: aggregated metrics for both splits, their
/// generalization ratios, and run metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    /// Aggregated train-split metrics
    pub train: AggregatedMetrics,
    /// Aggregated test-split metrics
    pub test: AggregatedMetrics,
    /// Test-over-train ratio per metric
    pub generalization: MetricRatios,
    /// Wall-clock training duration in seconds
    pub training_time_secs: f64,
    /// When the report was assembled
    pub created_at: DateTime<Utc>,
}

impl SummaryReport {
    /// Assemble a report from aggregated split metrics and the elapsed
    /// training time.
    pub fn assemble(
        train: AggregatedMetrics,
        test: AggregatedMetrics,
        training_time: Duration,
    ) -> Self {
        let generalization = MetricRatios::from_aggregates(&train, &test);
        SummaryReport {
            train,
            test,
            generalization,
            training_time_secs: training_time.as_secs_f64(),
            created_at: Utc::now(),
        }
    }

    /// Serialize the report to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Render the report as human-readable text.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "TRAINING (mean of {} folds)", self.train.folds);
        Self::write_block(&mut out, &self.train);
        let _ = writeln!(out, "TESTING (mean of {} folds)", self.test.folds);
        Self::write_block(&mut out, &self.test);

        let _ = writeln!(out, "performance:");
        let _ = writeln!(out, "  test_mcc:       {:.4}", self.test.mcc);
        let _ = writeln!(out, "  test_auc_pr:    {:.4}", self.test.auc_pr);
        let _ = writeln!(out, "  test_roc_auc:   {:.4}", self.test.roc_auc);
        let _ = writeln!(out, "  test_f1:        {:.4}", self.test.f1);
        let _ = writeln!(out, "  test_precision: {:.4}", self.test.precision);
        let _ = writeln!(out, "  test_recall:    {:.4}", self.test.recall);
        let _ = writeln!(out, "  test_log_loss:  {:.4}", self.test.log_loss);
        let _ = writeln!(out, "  test_accuracy:  {:.4}", self.test.accuracy);
        let _ = writeln!(out, "  test_tp: {}", self.test.confusion.tp);
        let _ = writeln!(out, "  test_tn: {}", self.test.confusion.tn);
        let _ = writeln!(out, "  test_fp: {}", self.test.confusion.fp);
        let _ = writeln!(out, "  test_fn: {}", self.test.confusion.fn_);
        let _ = writeln!(out, "  train_mcc:       {:.4}", self.train.mcc);
        let _ = writeln!(out, "  train_auc_pr:    {:.4}", self.train.auc_pr);
        let _ = writeln!(out, "  train_roc_auc:   {:.4}", self.train.roc_auc);
        let _ = writeln!(out, "  train_f1:        {:.4}", self.train.f1);
        let _ = writeln!(out, "  train_precision: {:.4}", self.train.precision);
        let _ = writeln!(out, "  train_recall:    {:.4}", self.train.recall);
        let _ = writeln!(out, "  train_log_loss:  {:.4}", self.train.log_loss);
        let _ = writeln!(out, "  train_accuracy:  {:.4}", self.train.accuracy);
        let _ = writeln!(out, "  train_tp: {}", self.train.confusion.tp);
        let _ = writeln!(out, "  train_tn: {}", self.train.confusion.tn);
        let _ = writeln!(out, "  train_fp: {}", self.train.confusion.fp);
        let _ = writeln!(out, "  train_fn: {}", self.train.confusion.fn_);
        let _ = writeln!(out, "  training_time: {:.2}s", self.training_time_secs);

        let _ = writeln!(out, "generalization (test/train):");
        Self::write_ratio(&mut out, "accuracy", self.generalization.accuracy);
        Self::write_ratio(&mut out, "roc_auc", self.generalization.roc_auc);
        Self::write_ratio(&mut out, "precision", self.generalization.precision);
        Self::write_ratio(&mut out, "recall", self.generalization.recall);
        Self::write_ratio(&mut out, "f1", self.generalization.f1);
        Self::write_ratio(&mut out, "log_loss", self.generalization.log_loss);
        Self::write_ratio(&mut out, "auc_pr", self.generalization.auc_pr);
        Self::write_ratio(&mut out, "mcc", self.generalization.mcc);
        out
    }

    fn write_block(out: &mut String, metrics: &AggregatedMetrics) {
        let _ = writeln!(out, "  accuracy:  {:.4}", metrics.accuracy);
        let _ = writeln!(out, "  roc_auc:   {:.4}", metrics.roc_auc);
        let _ = writeln!(out, "  precision: {:.4}", metrics.precision);
        let _ = writeln!(out, "  recall:    {:.4}", metrics.recall);
        let _ = writeln!(out, "  f1:        {:.4}", metrics.f1);
        let _ = writeln!(out, "  log_loss:  {:.4}", metrics.log_loss);
        let _ = writeln!(out, "  auc_pr:    {:.4}", metrics.auc_pr);
        let _ = writeln!(out, "  mcc:       {:.4}", metrics.mcc);
        let matrix = metrics.confusion.matrix();
        let _ = writeln!(out, "  confusion: [[{}, {}], [{}, {}]]",
            matrix[0][0], matrix[0][1], matrix[1][0], matrix[1][1]);
    }

    fn write_ratio(out: &mut String, name: &str, value: Option<f64>) {
        match value {
            Some(v) => {
                let _ = writeln!(out, "  {name}: {v:.4}");
            }
            None => {
                let _ = writeln!(out, "  {name}: n/a (train metric is zero)");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::ConfusionCounts;
    use approx::assert_abs_diff_eq;

    fn aggregated(accuracy: f64, mcc: f64) -> AggregatedMetrics {
        AggregatedMetrics {
            accuracy,
            roc_auc: 0.9,
            precision: 0.8,
            recall: 0.7,
            f1: 0.75,
            log_loss: 0.3,
            auc_pr: 0.85,
            mcc,
            confusion: ConfusionCounts { tn: 100, fp: 10, fn_: 20, tp: 70 },
            folds: 5,
        }
    }

    #[test]
    fn test_ratios() {
        let train = aggregated(0.95, 0.8);
        let test = aggregated(0.90, 0.6);
        let ratios = MetricRatios::from_aggregates(&train, &test);
        assert_abs_diff_eq!(ratios.accuracy.unwrap(), 0.90 / 0.95, epsilon = 1e-12);
        assert_abs_diff_eq!(ratios.mcc.unwrap(), 0.75, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_train_metric_gives_sentinel() {
        let train = aggregated(0.95, 0.0);
        let test = aggregated(0.90, 0.6);
        let ratios = MetricRatios::from_aggregates(&train, &test);
        assert_eq!(ratios.mcc, None);
    }

    #[test]
    fn test_summary_renders_all_sections() {
        let report = SummaryReport::assemble(
            aggregated(0.95, 0.8),
            aggregated(0.90, 0.6),
            Duration::from_secs_f64(1.5),
        );
        let text = report.summary();
        assert!(text.contains("TRAINING (mean of 5 folds)"));
        assert!(text.contains("TESTING (mean of 5 folds)"));
        assert!(text.contains("test_mcc:"));
        assert!(text.contains("training_time: 1.50s"));
        assert!(text.contains("generalization (test/train):"));
    }

    #[test]
    fn test_json_round_trip() {
        let report = SummaryReport::assemble(
            aggregated(0.95, 0.8),
            aggregated(0.90, 0.6),
            Duration::from_secs(2),
        );
        let json = report.to_json().unwrap();
        let parsed: SummaryReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }
}
