//! Core data types for the sleep-stage evaluation harness.
//!
//! Free-form mode, activation, and solver strings from upstream callers are
//! replaced with closed enumerations that fail fast on unrecognized values.

use crate::core::error::SleepStageError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Prediction and probability value type.
pub type Score = f32;

/// Binary target value type (0.0 or 1.0).
pub type Label = f32;

/// Validation strategy selected for a training run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationMode {
    /// One seeded shuffled train/test split
    Rapid,
    /// Leave-one-subject-out cross-validation
    CrossValidation,
}

impl Default for ValidationMode {
    fn default() -> Self {
        ValidationMode::Rapid
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationMode::Rapid => write!(f, "rapid"),
            ValidationMode::CrossValidation => write!(f, "cross_validation"),
        }
    }
}

impl FromStr for ValidationMode {
    type Err = SleepStageError;

    /// Parses a mode string. Both `cross_validation` and `cross-validation`
    /// are accepted: upstream callers historically disagreed on the spelling,
    /// and the hyphenated form must not fall through to the rapid path.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "rapid" => Ok(ValidationMode::Rapid),
            "cross_validation" | "cross-validation" => Ok(ValidationMode::CrossValidation),
            other => Err(SleepStageError::config(format!(
                "unrecognized train_type: {:?} (expected \"rapid\" or \"cross_validation\")",
                other
            ))),
        }
    }
}

/// Activation functions accepted by MLP-style classifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivationKind {
    /// Rectified linear unit
    Relu,
    /// Hyperbolic tangent
    Tanh,
    /// Logistic sigmoid
    Logistic,
    /// Identity (no-op)
    Identity,
}

impl Default for ActivationKind {
    fn default() -> Self {
        ActivationKind::Relu
    }
}

impl fmt::Display for ActivationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivationKind::Relu => write!(f, "relu"),
            ActivationKind::Tanh => write!(f, "tanh"),
            ActivationKind::Logistic => write!(f, "logistic"),
            ActivationKind::Identity => write!(f, "identity"),
        }
    }
}

impl FromStr for ActivationKind {
    type Err = SleepStageError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "relu" => Ok(ActivationKind::Relu),
            "tanh" => Ok(ActivationKind::Tanh),
            "logistic" => Ok(ActivationKind::Logistic),
            "identity" => Ok(ActivationKind::Identity),
            other => Err(SleepStageError::config(format!(
                "unrecognized activation: {:?}",
                other
            ))),
        }
    }
}

/// Optimizers accepted by MLP-style classifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolverKind {
    /// Adam optimizer
    Adam,
    /// Stochastic gradient descent
    Sgd,
    /// Limited-memory BFGS
    Lbfgs,
}

impl Default for SolverKind {
    fn default() -> Self {
        SolverKind::Adam
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverKind::Adam => write!(f, "adam"),
            SolverKind::Sgd => write!(f, "sgd"),
            SolverKind::Lbfgs => write!(f, "lbfgs"),
        }
    }
}

impl FromStr for SolverKind {
    type Err = SleepStageError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "adam" => Ok(SolverKind::Adam),
            "sgd" => Ok(SolverKind::Sgd),
            "lbfgs" => Ok(SolverKind::Lbfgs),
            other => Err(SleepStageError::config(format!(
                "unrecognized solver: {:?}",
                other
            ))),
        }
    }
}

/// Learning-rate schedules accepted by MLP-style classifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LearningRateSchedule {
    /// Fixed rate throughout training
    Constant,
    /// Gradually decreasing rate
    InvScaling,
    /// Rate kept while loss improves, divided when it stalls
    Adaptive,
}

impl Default for LearningRateSchedule {
    fn default() -> Self {
        LearningRateSchedule::Constant
    }
}

impl fmt::Display for LearningRateSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LearningRateSchedule::Constant => write!(f, "constant"),
            LearningRateSchedule::InvScaling => write!(f, "invscaling"),
            LearningRateSchedule::Adaptive => write!(f, "adaptive"),
        }
    }
}

impl FromStr for LearningRateSchedule {
    type Err = SleepStageError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "constant" => Ok(LearningRateSchedule::Constant),
            "invscaling" => Ok(LearningRateSchedule::InvScaling),
            "adaptive" => Ok(LearningRateSchedule::Adaptive),
            other => Err(SleepStageError::config(format!(
                "unrecognized learning_rate schedule: {:?}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_mode_parsing() {
        assert_eq!("rapid".parse::<ValidationMode>().unwrap(), ValidationMode::Rapid);
        assert_eq!(
            "cross_validation".parse::<ValidationMode>().unwrap(),
            ValidationMode::CrossValidation
        );
        // The hyphenated spelling used by one caller must resolve to the
        // cross-validation path, not fall through to rapid.
        assert_eq!(
            "cross-validation".parse::<ValidationMode>().unwrap(),
            ValidationMode::CrossValidation
        );
        assert!("loocv".parse::<ValidationMode>().is_err());
    }

    #[test]
    fn test_validation_mode_display() {
        assert_eq!(ValidationMode::Rapid.to_string(), "rapid");
        assert_eq!(ValidationMode::CrossValidation.to_string(), "cross_validation");
    }

    #[test]
    fn test_activation_round_trip() {
        for kind in [
            ActivationKind::Relu,
            ActivationKind::Tanh,
            ActivationKind::Logistic,
            ActivationKind::Identity,
        ] {
            assert_eq!(kind.to_string().parse::<ActivationKind>().unwrap(), kind);
        }
        assert!("gelu".parse::<ActivationKind>().is_err());
    }

    #[test]
    fn test_solver_round_trip() {
        for kind in [SolverKind::Adam, SolverKind::Sgd, SolverKind::Lbfgs] {
            assert_eq!(kind.to_string().parse::<SolverKind>().unwrap(), kind);
        }
        assert!("rmsprop".parse::<SolverKind>().is_err());
    }

    #[test]
    fn test_schedule_round_trip() {
        for kind in [
            LearningRateSchedule::Constant,
            LearningRateSchedule::InvScaling,
            LearningRateSchedule::Adaptive,
        ] {
            assert_eq!(kind.to_string().parse::<LearningRateSchedule>().unwrap(), kind);
        }
    }

    #[test]
    fn test_serialization() {
        let mode = ValidationMode::CrossValidation;
        let serialized = serde_json::to_string(&mode).unwrap();
        let deserialized: ValidationMode = serde_json::from_str(&serialized).unwrap();
        assert_eq!(mode, deserialized);
    }
}
