//! Training orchestration.
//!
//! The trainer takes a loaded feature table and a classifier, applies the
//! configured preprocessing (sentinel-stage filtering, optional seeded
//! subsampling, feature selection), runs the configured validation
//! strategy, and assembles the summary report.

use crate::config::TrainingConfig;
use crate::core::error::{Result, SleepStageError};
use crate::core::traits::BinaryClassifier;
use crate::core::types::ValidationMode;
use crate::dataset::{row_subjects, select_features, FeatureTable, SubjectId};
use crate::metrics::{aggregate, evaluate_fold};
use crate::report::SummaryReport;
use crate::validation::{cross_validate, train_test_split, LosoInput, SkippedSubject};
use ndarray::Axis;
use std::sync::atomic::AtomicBool;
use std::time::Instant;

/// Result of a training run: the report plus provenance of what was
/// evaluated.
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    /// Assembled summary report
    pub report: SummaryReport,
    /// Feature columns the model was trained on, in selection order
    pub features: Vec<String>,
    /// Subjects whose folds were evaluated (empty in rapid mode)
    pub evaluated_subjects: Vec<SubjectId>,
    /// Subjects skipped as degenerate (empty in rapid mode)
    pub skipped: Vec<SkippedSubject>,
}

/// Runs training and evaluation according to a [`TrainingConfig`].
#[derive(Debug, Clone)]
pub struct Trainer {
    config: TrainingConfig,
}

impl Trainer {
    /// Create a trainer after validating the configuration.
    pub fn new(config: TrainingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Trainer { config })
    }

    /// The validated configuration.
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Train and evaluate, producing a summary report.
    ///
    /// `make_model` is called once per fold so every fold starts from a
    /// fresh model.
    pub fn train<M, F>(&self, table: &FeatureTable, make_model: F) -> Result<TrainingOutcome>
    where
        M: BinaryClassifier,
        F: FnMut() -> M,
    {
        self.train_with_cancel(table, make_model, None)
    }

    /// Like [`Trainer::train`] with a cooperative cancellation flag,
    /// checked between folds.
    pub fn train_with_cancel<M, F>(
        &self,
        table: &FeatureTable,
        mut make_model: F,
        cancel: Option<&AtomicBool>,
    ) -> Result<TrainingOutcome>
    where
        M: BinaryClassifier,
        F: FnMut() -> M,
    {
        let started = Instant::now();

        let scored = table.retain_scored();
        log::info!(
            "retained {} of {} rows after dropping unscored stages",
            scored.num_rows(),
            table.num_rows()
        );
        let working = match &self.config.subsample {
            Some(subsample) => {
                let reduced = scored.subsample(subsample.fraction, subsample.seed)?;
                log::info!(
                    "subsampled to {} rows (fraction {}, seed {})",
                    reduced.num_rows(),
                    subsample.fraction,
                    subsample.seed
                );
                reduced
            }
            None => scored,
        };

        let features = select_features(working.feature_names(), self.config.use_all_regions);
        if features.is_empty() {
            return Err(SleepStageError::config(
                "feature selection produced no columns",
            ));
        }
        log::info!("selected {} feature columns", features.len());

        let matrix = working.design_matrix(&features)?;
        let labels = working.binary_labels();

        let outcome = match self.config.mode {
            ValidationMode::CrossValidation => {
                let subjects = row_subjects(&working)?;
                let input = LosoInput {
                    features: &matrix,
                    labels: &labels,
                    subjects: &subjects,
                };
                let loso = cross_validate(input, make_model, cancel)?;
                let train = aggregate(&loso.train_folds())?;
                let test = aggregate(&loso.test_folds())?;
                TrainingOutcome {
                    report: SummaryReport::assemble(train, test, started.elapsed()),
                    features,
                    evaluated_subjects: loso.folds.iter().map(|f| f.subject.clone()).collect(),
                    skipped: loso.skipped,
                }
            }
            ValidationMode::Rapid => {
                let (train_idx, test_idx) = train_test_split(
                    working.num_rows(),
                    self.config.test_fraction,
                    self.config.split_seed,
                )?;
                let x_train = matrix.select(Axis(0), &train_idx);
                let x_test = matrix.select(Axis(0), &test_idx);
                let y_train = labels.select(Axis(0), &train_idx);
                let y_test = labels.select(Axis(0), &test_idx);

                let mut model = make_model();
                let evaluation = evaluate_fold(
                    &mut model,
                    x_train.view(),
                    y_train.view(),
                    x_test.view(),
                    y_test.view(),
                )?;
                let train = aggregate(std::slice::from_ref(&evaluation.train))?;
                let test = aggregate(std::slice::from_ref(&evaluation.test))?;
                TrainingOutcome {
                    report: SummaryReport::assemble(train, test, started.elapsed()),
                    features,
                    evaluated_subjects: Vec::new(),
                    skipped: Vec::new(),
                }
            }
        };

        log::info!(
            "training finished in {:.2}s: test accuracy {:.4}, test roc-auc {:.4}",
            outcome.report.training_time_secs,
            outcome.report.test.accuracy,
            outcome.report.test.roc_auc
        );
        Ok(outcome)
    }
}
