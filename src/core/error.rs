//! Error handling and error types for the sleep-stage evaluation harness.
//!
//! All fallible operations in the crate return [`Result`] with
//! [`SleepStageError`], keeping error propagation explicit from the dataset
//! edge through cross-validation to report assembly.

use std::io;
use thiserror::Error;

/// Main error type for the harness.
#[derive(Error, Debug)]
pub enum SleepStageError {
    /// Configuration and validation errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Feature-table construction and access errors
    #[error("Dataset error: {message}")]
    Dataset { message: String },

    /// Epoch keys that cannot be parsed into a subject identifier
    #[error("Malformed epoch key {key:?}: {reason}")]
    MalformedKey { key: String, reason: String },

    /// A fold whose label vector makes probability metrics undefined
    #[error("Degenerate fold: {message}")]
    DegenerateFold { message: String },

    /// Model fitting failures reported by the classifier
    #[error("Training error: {message}")]
    Training { message: String },

    /// Model inference failures reported by the classifier
    #[error("Prediction error: {message}")]
    Prediction { message: String },

    /// Shape disagreement between features, labels, or subject keys
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: String, actual: String },

    /// Cross-validation run cancelled via the caller's flag
    #[error("Cancelled: {stage}")]
    Cancelled { stage: String },

    /// File I/O errors
    #[error("I/O error: {source}")]
    IO {
        #[from]
        source: io::Error,
    },

    /// CSV parsing errors
    #[error("CSV parsing error: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    /// JSON serialization errors
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

/// Type alias for Results using SleepStageError
pub type Result<T> = std::result::Result<T, SleepStageError>;

impl SleepStageError {
    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        SleepStageError::Config {
            message: message.into(),
        }
    }

    /// Create a dataset error
    pub fn dataset<S: Into<String>>(message: S) -> Self {
        SleepStageError::Dataset {
            message: message.into(),
        }
    }

    /// Create a malformed-key error
    pub fn malformed_key<K, R>(key: K, reason: R) -> Self
    where
        K: Into<String>,
        R: Into<String>,
    {
        SleepStageError::MalformedKey {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Create a degenerate-fold error
    pub fn degenerate_fold<S: Into<String>>(message: S) -> Self {
        SleepStageError::DegenerateFold {
            message: message.into(),
        }
    }

    /// Create a training error
    pub fn training<S: Into<String>>(message: S) -> Self {
        SleepStageError::Training {
            message: message.into(),
        }
    }

    /// Create a prediction error
    pub fn prediction<S: Into<String>>(message: S) -> Self {
        SleepStageError::Prediction {
            message: message.into(),
        }
    }

    /// Create a dimension mismatch error
    pub fn dimension_mismatch<E, A>(expected: E, actual: A) -> Self
    where
        E: Into<String>,
        A: Into<String>,
    {
        SleepStageError::DimensionMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a cancellation error
    pub fn cancelled<S: Into<String>>(stage: S) -> Self {
        SleepStageError::Cancelled {
            stage: stage.into(),
        }
    }

    /// Check if this error is recoverable.
    ///
    /// Degenerate folds are recoverable: the cross-validation driver skips
    /// the offending subject and continues. Configuration, dataset, and key
    /// errors surface before any fold runs and are not.
    pub fn is_recoverable(&self) -> bool {
        match self {
            SleepStageError::Config { .. } => false,
            SleepStageError::Dataset { .. } => false,
            SleepStageError::MalformedKey { .. } => false,
            SleepStageError::DegenerateFold { .. } => true,
            SleepStageError::Training { .. } => false,
            SleepStageError::Prediction { .. } => false,
            SleepStageError::DimensionMismatch { .. } => false,
            SleepStageError::Cancelled { .. } => false,
            SleepStageError::IO { .. } => false,
            SleepStageError::Csv { .. } => false,
            SleepStageError::Json { .. } => false,
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            SleepStageError::Config { .. } => "config",
            SleepStageError::Dataset { .. } => "dataset",
            SleepStageError::MalformedKey { .. } => "malformed_key",
            SleepStageError::DegenerateFold { .. } => "degenerate_fold",
            SleepStageError::Training { .. } => "training",
            SleepStageError::Prediction { .. } => "prediction",
            SleepStageError::DimensionMismatch { .. } => "dimension_mismatch",
            SleepStageError::Cancelled { .. } => "cancelled",
            SleepStageError::IO { .. } => "io",
            SleepStageError::Csv { .. } => "csv",
            SleepStageError::Json { .. } => "json",
        }
    }
}
