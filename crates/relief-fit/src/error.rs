//! Error types for hilltop data parsing and relief-length fitting.

use thiserror::Error;

/// Errors that can occur while loading samples or fitting the model.
#[derive(Error, Debug)]
pub enum FitError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A consumed CSV column is missing or not a number.
    #[error("bad value {value:?} in column {column} at line {line}")]
    Format {
        line: usize,
        column: usize,
        value: String,
    },

    /// Samples, constants or the starting guess cannot be fitted.
    #[error("invalid fit input: {0}")]
    InvalidInput(String),

    /// The model is not finite where it must be evaluated.
    #[error("model is not finite: {0}")]
    NonFinite(String),

    /// The optimizer ran out of iterations.
    #[error("fit did not converge after {iterations} iterations")]
    Convergence { iterations: usize },

    /// Report serialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl FitError {
    /// Create a Format error for a 1-based line number and 0-based column.
    pub fn format(line: usize, column: usize, value: impl Into<String>) -> Self {
        Self::Format {
            line,
            column,
            value: value.into(),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Result type for fitting operations.
pub type Result<T> = std::result::Result<T, FitError>;
