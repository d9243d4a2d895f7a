//! Error types for raster reading and tick generation.

use thiserror::Error;

/// Errors that can occur while reading, writing or annotating a raster.
#[derive(Error, Debug)]
pub enum RasterError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A header line is malformed or a required field does not parse.
    #[error("malformed header at line {line}: {message}")]
    Format { line: usize, message: String },

    /// The payload does not hold exactly `nrows * ncols` 32-bit values.
    #[error("payload of {actual_bytes} bytes does not hold the {expected_cells} cells the header describes")]
    Shape {
        expected_cells: usize,
        actual_bytes: usize,
    },

    /// A value buffer does not hold exactly `nrows * ncols` cells.
    #[error("{actual_cells} values do not fill the {expected_cells} cells the header describes")]
    CellCount {
        expected_cells: usize,
        actual_cells: usize,
    },

    /// The cell or byte count of the grid does not fit in `usize`.
    #[error("raster of {ncols} x {nrows} cells is too large to address")]
    TooLarge { ncols: usize, nrows: usize },

    /// The path does not name a `.flt` or `.hdr` file.
    #[error("not a float raster path: {0}")]
    InvalidPath(String),

    /// Tick marks cannot be generated for the requested window.
    #[error("cannot compute tick marks: {0}")]
    InvalidTicks(String),
}

impl RasterError {
    /// Create a Format error for a 1-based line number.
    pub fn format(line: usize, message: impl Into<String>) -> Self {
        Self::Format {
            line,
            message: message.into(),
        }
    }

    /// Create a Shape error.
    pub fn shape(expected_cells: usize, actual_bytes: usize) -> Self {
        Self::Shape {
            expected_cells,
            actual_bytes,
        }
    }

    /// Create a CellCount error.
    pub fn cell_count(expected_cells: usize, actual_cells: usize) -> Self {
        Self::CellCount {
            expected_cells,
            actual_cells,
        }
    }

    /// Create an InvalidTicks error.
    pub fn invalid_ticks(message: impl Into<String>) -> Self {
        Self::InvalidTicks(message.into())
    }
}

/// Result type for raster operations.
pub type Result<T> = std::result::Result<T, RasterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_message() {
        let err = RasterError::format(3, "expected key 'xllcorner', found 'foo'");
        assert_eq!(
            err.to_string(),
            "malformed header at line 3: expected key 'xllcorner', found 'foo'"
        );
    }

    #[test]
    fn test_shape_error_message() {
        let err = RasterError::shape(12, 44);
        assert_eq!(
            err.to_string(),
            "payload of 44 bytes does not hold the 12 cells the header describes"
        );
    }

    #[test]
    fn test_cell_count_error_message() {
        let err = RasterError::cell_count(6, 5);
        assert_eq!(
            err.to_string(),
            "5 values do not fill the 6 cells the header describes"
        );
    }
}
