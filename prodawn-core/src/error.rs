//! Error types for prodawn-core.
//!
//! Three kinds of failure reach the caller: bad input (`ValidationError`),
//! missing or broken model artifacts (`ConfigurationError`) and a failing
//! model invocation (`PredictionError`). None of them is fatal; the request
//! boundary turns each one into a message for the user.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error returned by verdict engines.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Prediction error: {0}")]
    Prediction(#[from] PredictionError),
}

impl CoreError {
    /// Short message suitable for showing to an end user.
    pub fn user_message(&self) -> String {
        match self {
            CoreError::Validation(e) => format!("Please check your input: {}", e),
            CoreError::Configuration(e @ ConfigurationError::InvalidWeights(_)) => {
                format!("Please fix the [scoring] section of your config: {}", e)
            }
            CoreError::Configuration(e) => format!(
                "The trained model is not available ({}). Provide model artifacts or use the heuristic engine.",
                e
            ),
            CoreError::Prediction(e) => format!("Prediction failed: {}", e),
        }
    }

    /// Whether falling back to another engine can still produce a verdict.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CoreError::Configuration(_))
    }
}

/// Input attribute outside its domain.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("duration must be between {min} and {max} minutes, got {value}")]
    DurationOutOfRange { value: i64, min: u32, max: u32 },

    #[error("{field} must be a whole number, got '{value}'")]
    NotANumber { field: &'static str, value: String },

    #[error("unknown {field} '{value}' (expected one of: {expected})")]
    UnknownValue {
        field: &'static str,
        value: String,
        expected: String,
    },
}

/// Model artifacts missing, unreadable or inconsistent.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("{kind} artifact not found at {path}")]
    MissingArtifact { kind: &'static str, path: PathBuf },

    #[error("failed to read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("training column list is empty")]
    EmptyColumns,

    #[error("no trained model loaded")]
    ModelUnavailable,

    #[error("no training column order loaded")]
    ColumnsUnavailable,

    #[error("invalid scoring weights: {0}")]
    InvalidWeights(String),
}

/// The trained model rejected the row or returned something unusable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictionError {
    #[error("feature row has {actual} columns but the model expects {expected}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("model returned label {0}, expected 0 or 1")]
    InvalidLabel(i64),

    #[error("model returned an invalid probability vector: {0}")]
    InvalidProbabilities(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
