//! Validation strategies: leave-one-subject-out cross-validation and the
//! seeded random holdout split used by rapid mode.

use crate::core::error::{Result, SleepStageError};
use crate::core::traits::BinaryClassifier;
use crate::core::types::{Label, Score};
use crate::dataset::SubjectId;
use crate::metrics::{evaluate_fold, SplitEvaluation};
use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};

/// Row-aligned inputs to the cross-validation driver.
#[derive(Debug, Clone, Copy)]
pub struct LosoInput<'a> {
    /// Design matrix, one row per epoch
    pub features: &'a Array2<Score>,
    /// Binary labels aligned with the rows
    pub labels: &'a Array1<Label>,
    /// Subject identifier for each row
    pub subjects: &'a [SubjectId],
}

/// One evaluated fold, keyed by the held-out subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectFold {
    /// The subject whose epochs formed the test split
    pub subject: SubjectId,
    /// Number of test rows in the fold
    pub test_rows: usize,
    /// Train and test metric panels
    pub evaluation: SplitEvaluation,
}

/// A subject excluded from aggregation, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedSubject {
    /// The subject that could not be evaluated
    pub subject: SubjectId,
    /// Human-readable reason for the skip
    pub reason: String,
}

/// Result of a full cross-validation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LosoOutcome {
    /// Evaluated folds in first-seen subject order
    pub folds: Vec<SubjectFold>,
    /// Subjects skipped as degenerate
    pub skipped: Vec<SkippedSubject>,
}

impl LosoOutcome {
    /// The train-split metric panels, one per evaluated fold.
    pub fn train_folds(&self) -> Vec<crate::metrics::FoldMetrics> {
        self.folds.iter().map(|f| f.evaluation.train.clone()).collect()
    }

    /// The test-split metric panels, one per evaluated fold.
    pub fn test_folds(&self) -> Vec<crate::metrics::FoldMetrics> {
        self.folds.iter().map(|f| f.evaluation.test.clone()).collect()
    }
}

fn has_both_classes(labels: &[Label]) -> bool {
    let mut saw_positive = false;
    let mut saw_negative = false;
    for &label in labels {
        if label >= 0.5 {
            saw_positive = true;
        } else {
            saw_negative = true;
        }
        if saw_positive && saw_negative {
            return true;
        }
    }
    false
}

/// Run leave-one-subject-out cross-validation.
///
/// Each distinct subject, in first-seen order, is held out once while a
/// fresh model produced by `make_model` is fit on everything else.
/// Subjects whose fold would be degenerate (single-class labels on either
/// split) are skipped with a warning rather than failing the run, and the
/// fold count shrinks accordingly. A cooperative cancellation flag is
/// checked before each fold.
pub fn cross_validate<M, F>(
    input: LosoInput<'_>,
    mut make_model: F,
    cancel: Option<&AtomicBool>,
) -> Result<LosoOutcome>
where
    M: BinaryClassifier,
    F: FnMut() -> M,
{
    let rows = input.features.nrows();
    if input.labels.len() != rows || input.subjects.len() != rows {
        return Err(SleepStageError::dimension_mismatch(
            format!("{rows} feature rows"),
            format!(
                "{} labels, {} subject keys",
                input.labels.len(),
                input.subjects.len()
            ),
        ));
    }
    if rows == 0 {
        return Err(SleepStageError::dataset("no rows to cross-validate"));
    }

    let subjects = crate::dataset::unique_subjects(input.subjects);
    log::info!(
        "cross-validation over {} subjects, {} rows",
        subjects.len(),
        rows
    );

    let mut folds = Vec::with_capacity(subjects.len());
    let mut skipped = Vec::new();

    for subject in subjects {
        if let Some(flag) = cancel {
            if flag.load(Ordering::Relaxed) {
                return Err(SleepStageError::cancelled("cross-validation"));
            }
        }

        let (test_idx, train_idx): (Vec<usize>, Vec<usize>) = {
            let mut test = Vec::new();
            let mut train = Vec::new();
            for (row, key) in input.subjects.iter().enumerate() {
                if *key == subject {
                    test.push(row);
                } else {
                    train.push(row);
                }
            }
            (test, train)
        };

        if test_idx.is_empty() || train_idx.is_empty() {
            log::warn!("skipping subject {subject}: empty split");
            skipped.push(SkippedSubject {
                subject,
                reason: "empty split".to_string(),
            });
            continue;
        }

        let y_train: Vec<Label> = train_idx.iter().map(|&i| input.labels[i]).collect();
        let y_test: Vec<Label> = test_idx.iter().map(|&i| input.labels[i]).collect();
        if !has_both_classes(&y_train) || !has_both_classes(&y_test) {
            log::warn!("skipping subject {subject}: single-class split");
            skipped.push(SkippedSubject {
                subject,
                reason: "single-class split".to_string(),
            });
            continue;
        }

        let x_train = input.features.select(Axis(0), &train_idx);
        let x_test = input.features.select(Axis(0), &test_idx);
        let y_train = Array1::from_vec(y_train);
        let y_test = Array1::from_vec(y_test);

        let mut model = make_model();
        match evaluate_fold(
            &mut model,
            x_train.view(),
            y_train.view(),
            x_test.view(),
            y_test.view(),
        ) {
            Ok(evaluation) => {
                log::debug!(
                    "subject {subject}: test accuracy {:.4}, test roc-auc {:.4}",
                    evaluation.test.accuracy,
                    evaluation.test.roc_auc
                );
                folds.push(SubjectFold {
                    subject,
                    test_rows: test_idx.len(),
                    evaluation,
                });
            }
            Err(err) if err.is_recoverable() => {
                log::warn!("skipping subject {subject}: {err}");
                skipped.push(SkippedSubject {
                    subject,
                    reason: err.to_string(),
                });
            }
            Err(err) => return Err(err),
        }
    }

    Ok(LosoOutcome { folds, skipped })
}

/// Split row indices into a seeded random (train, test) partition.
///
/// The test split holds `round(test_fraction * n_rows)` rows, at least one
/// and at most `n_rows - 1` so both splits are non-empty.
pub fn train_test_split(
    n_rows: usize,
    test_fraction: f64,
    seed: u64,
) -> Result<(Vec<usize>, Vec<usize>)> {
    if n_rows < 2 {
        return Err(SleepStageError::dataset(format!(
            "need at least 2 rows to split, got {n_rows}"
        )));
    }
    if !(0.0..1.0).contains(&test_fraction) || test_fraction == 0.0 {
        return Err(SleepStageError::config(format!(
            "test_fraction must be in (0, 1), got {test_fraction}"
        )));
    }

    let mut indices: Vec<usize> = (0..n_rows).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let test_size = ((test_fraction * n_rows as f64).round() as usize).clamp(1, n_rows - 1);
    let test: Vec<usize> = indices[..test_size].to_vec();
    let train: Vec<usize> = indices[test_size..].to_vec();
    Ok((train, test))
}
