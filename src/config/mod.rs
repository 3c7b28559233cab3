//! Training configuration for the evaluation harness.
//!
//! [`TrainingConfig`] collects the validation mode, the feature-selection
//! policy, classifier hyperparameters passed through to the model contract,
//! and the optional seeded subsample. [`ConfigBuilder`] validates everything
//! up front so configuration errors surface before any fold runs.

use crate::core::constants::{DEFAULT_SPLIT_SEED, DEFAULT_TEST_FRACTION};
use crate::core::error::{Result, SleepStageError};
use crate::core::types::{ActivationKind, LearningRateSchedule, SolverKind, ValidationMode};
use serde::{Deserialize, Serialize};

/// Hyperparameters passed through, unmodified, to the classifier under
/// evaluation. The harness never interprets them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ModelParams {
    /// Gradient-boosted tree parameters
    Tree {
        /// Shrinkage applied to each boosting step
        learning_rate: f64,
        /// Number of trees
        n_estimators: usize,
        /// Maximum tree depth (-1 for unlimited)
        max_depth: i32,
        /// Maximum leaves per tree
        num_leaves: usize,
        /// L1 regularization strength
        lambda_l1: f64,
        /// L2 regularization strength
        lambda_l2: f64,
    },
    /// Multilayer-perceptron parameters
    Mlp {
        /// Units per hidden layer
        hidden_layer_sizes: Vec<usize>,
        /// Activation function
        activation: ActivationKind,
        /// Weight optimizer
        solver: SolverKind,
        /// Learning-rate schedule
        learning_rate: LearningRateSchedule,
        /// Maximum training iterations
        max_iter: usize,
    },
}

impl Default for ModelParams {
    fn default() -> Self {
        ModelParams::Tree {
            learning_rate: 0.1,
            n_estimators: 100,
            max_depth: -1,
            num_leaves: 31,
            lambda_l1: 0.0,
            lambda_l2: 0.0,
        }
    }
}

impl ModelParams {
    /// Default MLP parameter set mirroring the usual two-layer baseline.
    pub fn default_mlp() -> Self {
        ModelParams::Mlp {
            hidden_layer_sizes: vec![100, 50],
            activation: ActivationKind::Relu,
            solver: SolverKind::Adam,
            learning_rate: LearningRateSchedule::Constant,
            max_iter: 200,
        }
    }

    fn validate(&self) -> Result<()> {
        match self {
            ModelParams::Tree {
                learning_rate,
                n_estimators,
                max_depth,
                num_leaves,
                lambda_l1,
                lambda_l2,
            } => {
                if *learning_rate <= 0.0 || !learning_rate.is_finite() {
                    return Err(SleepStageError::config(format!(
                        "learning_rate must be positive, got {}",
                        learning_rate
                    )));
                }
                if *n_estimators == 0 {
                    return Err(SleepStageError::config("n_estimators must be at least 1"));
                }
                if *max_depth < -1 {
                    return Err(SleepStageError::config(format!(
                        "max_depth must be -1 (unlimited) or non-negative, got {}",
                        max_depth
                    )));
                }
                if *num_leaves < 2 {
                    return Err(SleepStageError::config(format!(
                        "num_leaves must be at least 2, got {}",
                        num_leaves
                    )));
                }
                if *lambda_l1 < 0.0 || *lambda_l2 < 0.0 {
                    return Err(SleepStageError::config(
                        "lambda_l1 and lambda_l2 must be non-negative",
                    ));
                }
            }
            ModelParams::Mlp {
                hidden_layer_sizes,
                max_iter,
                ..
            } => {
                if hidden_layer_sizes.is_empty() {
                    return Err(SleepStageError::config(
                        "hidden_layer_sizes must name at least one layer",
                    ));
                }
                if hidden_layer_sizes.iter().any(|&units| units == 0) {
                    return Err(SleepStageError::config(
                        "hidden layers must have at least one unit",
                    ));
                }
                if *max_iter == 0 {
                    return Err(SleepStageError::config("max_iter must be at least 1"));
                }
            }
        }
        Ok(())
    }
}

/// Seeded fractional down-sampling applied before fold iteration.
///
/// Never applied implicitly; a caller that wants it must supply both the
/// fraction and the seed so runs stay reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Subsample {
    /// Fraction of rows to keep, in (0, 1]
    pub fraction: f64,
    /// Seed for the row shuffle
    pub seed: u64,
}

/// Main configuration for a training invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Validation strategy
    pub mode: ValidationMode,
    /// When true, select every region×band column; otherwise the fixed
    /// anterior six
    pub use_all_regions: bool,
    /// Classifier hyperparameters (passed through to the model)
    pub model: ModelParams,
    /// Optional seeded down-sampling of rows before training
    pub subsample: Option<Subsample>,
    /// Held-out fraction for the rapid split
    pub test_fraction: f64,
    /// Shuffle seed for the rapid split
    pub split_seed: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        TrainingConfig {
            mode: ValidationMode::default(),
            use_all_regions: false,
            model: ModelParams::default(),
            subsample: None,
            test_fraction: DEFAULT_TEST_FRACTION,
            split_seed: DEFAULT_SPLIT_SEED,
        }
    }
}

impl TrainingConfig {
    /// Create a configuration builder.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Validate all parameters, returning the first violation found.
    pub fn validate(&self) -> Result<()> {
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(SleepStageError::config(format!(
                "test_fraction must be in (0, 1), got {}",
                self.test_fraction
            )));
        }
        if let Some(subsample) = &self.subsample {
            if !(subsample.fraction > 0.0 && subsample.fraction <= 1.0) {
                return Err(SleepStageError::config(format!(
                    "subsample fraction must be in (0, 1], got {}",
                    subsample.fraction
                )));
            }
        }
        self.model.validate()
    }
}

/// Builder for [`TrainingConfig`].
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: TrainingConfig,
}

impl ConfigBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        ConfigBuilder {
            config: TrainingConfig::default(),
        }
    }

    /// Set the validation mode.
    pub fn mode(mut self, mode: ValidationMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Select all region×band columns instead of the fixed anterior set.
    pub fn use_all_regions(mut self, use_all_regions: bool) -> Self {
        self.config.use_all_regions = use_all_regions;
        self
    }

    /// Set the classifier hyperparameters.
    pub fn model(mut self, model: ModelParams) -> Self {
        self.config.model = model;
        self
    }

    /// Down-sample rows to `fraction` with a fixed seed before training.
    pub fn subsample(mut self, fraction: f64, seed: u64) -> Self {
        self.config.subsample = Some(Subsample { fraction, seed });
        self
    }

    /// Set the held-out fraction for the rapid split.
    pub fn test_fraction(mut self, test_fraction: f64) -> Self {
        self.config.test_fraction = test_fraction;
        self
    }

    /// Set the shuffle seed for the rapid split.
    pub fn split_seed(mut self, split_seed: u64) -> Self {
        self.config.split_seed = split_seed;
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<TrainingConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
