//! # EEG Sleep-Stage Evaluation Harness
//!
//! A training and evaluation harness for binary sleep-stage classifiers
//! built on EEG power-band features, with leave-one-subject-out
//! cross-validation as its core strategy.
//!
//! ## Features
//!
//! - **Subject-aware validation**: Leave-one-subject-out folds derived from
//!   epoch identifiers, so no subject's epochs leak between train and test.
//! - **Full metric panel**: Accuracy, tie-corrected ROC-AUC, precision,
//!   recall, F1, clipped log-loss, trapezoidal AUC-PR, and MCC per fold.
//! - **Deterministic runs**: Seeded subsampling and seeded holdout splits;
//!   rank-based ROC-AUC is independent of input order.
//! - **Model-agnostic**: Any classifier implementing [`BinaryClassifier`]
//!   plugs into the harness; hyperparameters pass through untouched.
//! - **Honest reporting**: Equal-weight fold means next to pooled confusion
//!   counts, plus test-over-train generalization ratios.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use eeg_sleepstage::{
//!     BinaryClassifier, ConfigBuilder, CsvTableLoader, Label, Result, Score, Trainer,
//!     ValidationMode,
//! };
//! use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
//!
//! // Any classifier implementing the trait plugs into the harness.
//! struct Baseline;
//!
//! impl BinaryClassifier for Baseline {
//!     fn fit(&mut self, _: ArrayView2<'_, Score>, _: ArrayView1<'_, Label>) -> Result<()> {
//!         Ok(())
//!     }
//!     fn predict(&self, features: ArrayView2<'_, Score>) -> Result<Array1<Label>> {
//!         Ok(Array1::ones(features.nrows()))
//!     }
//!     fn predict_proba(&self, features: ArrayView2<'_, Score>) -> Result<Array2<Score>> {
//!         Ok(Array2::from_elem((features.nrows(), 2), 0.5))
//!     }
//! }
//!
//! fn main() -> Result<()> {
//!     env_logger::init();
//!
//!     let table = CsvTableLoader::new().load("power_bands.csv")?;
//!     let config = ConfigBuilder::new()
//!         .mode(ValidationMode::CrossValidation)
//!         .use_all_regions(false)
//!         .build()?;
//!
//!     let trainer = Trainer::new(config)?;
//!     let outcome = trainer.train(&table, || Baseline)?;
//!     println!("{}", outcome.report.summary());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: Types, constants, error handling, and the classifier trait
//! - [`config`]: Training configuration with builder and validation
//! - [`dataset`]: Feature tables, CSV loading, subject keys, label mapping
//! - [`metrics`]: Per-fold metric panel and cross-fold aggregation
//! - [`validation`]: Leave-one-subject-out driver and holdout splitting
//! - [`report`]: Summary report with generalization ratios
//! - [`trainer`]: End-to-end orchestration

#![warn(missing_docs)]
#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub,
    non_snake_case,
    non_upper_case_globals
)]

// Core infrastructure module
pub mod core;

// Configuration management module
pub mod config;

// Dataset management module
pub mod dataset;

// Metrics evaluation module
pub mod metrics;

// Validation strategies module
pub mod validation;

// Report assembly module
pub mod report;

// Training orchestration module
pub mod trainer;

// Re-export core functionality for convenience
pub use crate::core::{
    constants::*,
    error::{Result, SleepStageError},
    traits::BinaryClassifier,
    types::{ActivationKind, Label, LearningRateSchedule, Score, SolverKind, ValidationMode},
};

// Re-export configuration functionality
pub use config::{ConfigBuilder, ModelParams, Subsample, TrainingConfig};

// Re-export dataset functionality
pub use dataset::{
    binary_label, is_scored, row_subjects, select_features, unique_subjects, CsvTableLoader,
    FeatureTable, SubjectId, TableMetadata,
};

// Re-export metrics functionality
pub use metrics::{
    aggregate, evaluate_fold, AggregatedMetrics, ConfusionCounts, FoldMetrics, SplitEvaluation,
};

// Re-export validation functionality
pub use validation::{
    cross_validate, train_test_split, LosoInput, LosoOutcome, SkippedSubject, SubjectFold,
};

// Re-export report functionality
pub use report::{MetricRatios, SummaryReport};

// Re-export trainer functionality
pub use trainer::{Trainer, TrainingOutcome};

// Version information
pub use crate::core::constants::EEG_SLEEPSTAGE_VERSION as VERSION;
