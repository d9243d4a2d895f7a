//! Error types for hillslope statistics.

use thiserror::Error;

/// Errors that can occur while reading estimates or computing statistics.
#[derive(Error, Debug)]
pub enum StatsError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A table column is missing or not a number.
    #[error("bad value {value:?} in column {column} at line {line}")]
    Format {
        line: usize,
        column: usize,
        value: String,
    },

    /// The statistic needs more data than it was given.
    #[error("not enough data: {0}")]
    Empty(String),

    /// The data or settings cannot produce the statistic.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl StatsError {
    /// Create a Format error for a 1-based line number and 0-based column.
    pub fn format(line: usize, column: usize, value: impl Into<String>) -> Self {
        Self::Format {
            line,
            column,
            value: value.into(),
        }
    }

    /// Create an Empty error.
    pub fn empty(msg: impl Into<String>) -> Self {
        Self::Empty(msg.into())
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Result type for statistics operations.
pub type Result<T> = std::result::Result<T, StatsError>;
