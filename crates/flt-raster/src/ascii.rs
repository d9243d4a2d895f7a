//! ESRI ASCII grid (`.asc`) reading.
//!
//! Six `key value` header lines followed by whitespace-separated cell values,
//! top row first.

use std::path::Path;

use tracing::info;

use crate::error::{RasterError, Result};
use crate::grid::RasterGrid;
use crate::header::{
    check_size, header_fields, parse_dimension, parse_number, ByteOrder, RasterHeader,
};

/// Header keys of an ASCII grid.
pub const ASCII_HEADER_KEYS: [&str; 6] = [
    "ncols",
    "nrows",
    "xllcorner",
    "yllcorner",
    "cellsize",
    "NODATA_value",
];

/// Read an ASCII grid from disk.
pub fn read_ascii_grid(path: impl AsRef<Path>) -> Result<RasterGrid> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let grid = parse_ascii_grid(&text)?;
    info!(
        path = %path.display(),
        rows = grid.nrows(),
        cols = grid.ncols(),
        "Read ASCII raster"
    );
    Ok(grid)
}

/// Parse ASCII grid text.
pub fn parse_ascii_grid(text: &str) -> Result<RasterGrid> {
    let (fields, consumed) = header_fields(text, &ASCII_HEADER_KEYS)?;
    let header = RasterHeader {
        ncols: parse_dimension(&fields[0])?,
        nrows: parse_dimension(&fields[1])?,
        xllcorner: parse_number(&fields[2])?,
        yllcorner: parse_number(&fields[3])?,
        cellsize: parse_number(&fields[4])?,
        nodata_value: parse_number(&fields[5])?,
        byte_order: ByteOrder::LsbFirst,
    };

    check_size(&header, fields[1].line)?;
    let expected = header.checked_cell_count()?;

    let mut values = Vec::new();
    for (index, line) in text.lines().enumerate().skip(consumed) {
        for token in line.split_whitespace() {
            let value = token.parse::<f32>().map_err(|_| {
                RasterError::format(index + 1, format!("'{}' is not a number", token))
            })?;
            values.push(value);
        }
    }

    if values.len() != expected {
        return Err(RasterError::cell_count(expected, values.len()));
    }

    RasterGrid::new(header, values)
}
