//! In-memory raster grid.

use crate::error::{RasterError, Result};
use crate::header::RasterHeader;

/// A row-major grid of 32-bit cells paired with its header.
///
/// Row 0 is the northernmost row. Nodata cells keep their position but are
/// skipped by the value accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterGrid {
    header: RasterHeader,
    data: Vec<f32>,
}

impl RasterGrid {
    /// Pair a flat row-major buffer with its header.
    pub fn new(header: RasterHeader, data: Vec<f32>) -> Result<Self> {
        let expected = header.checked_cell_count()?;
        if data.len() != expected {
            return Err(RasterError::cell_count(expected, data.len()));
        }
        Ok(Self { header, data })
    }

    pub fn header(&self) -> &RasterHeader {
        &self.header
    }

    /// Flat row-major cell values, nodata included.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn nrows(&self) -> usize {
        self.header.nrows
    }

    pub fn ncols(&self) -> usize {
        self.header.ncols
    }

    /// Borrow one row, top row first.
    pub fn row(&self, row: usize) -> Option<&[f32]> {
        if row >= self.header.nrows {
            return None;
        }
        let start = row * self.header.ncols;
        Some(&self.data[start..start + self.header.ncols])
    }

    /// Iterate over rows, top row first.
    pub fn rows(&self) -> impl Iterator<Item = &[f32]> {
        // chunks() panics on zero, an empty grid has no rows anyway
        self.data.chunks(self.header.ncols.max(1))
    }

    /// Raw cell value, nodata included.
    pub fn raw(&self, row: usize, col: usize) -> Option<f32> {
        if row >= self.header.nrows || col >= self.header.ncols {
            return None;
        }
        Some(self.data[row * self.header.ncols + col])
    }

    /// Cell value, or `None` when out of bounds or nodata.
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        self.raw(row, col).filter(|v| !self.is_nodata(*v))
    }

    /// Whether a value equals the header's nodata marker.
    pub fn is_nodata(&self, value: f32) -> bool {
        let nodata = self.header.nodata_value;
        value as f64 == nodata || (nodata.is_nan() && value.is_nan())
    }

    /// Iterate over every value that is not nodata.
    pub fn valid_values(&self) -> impl Iterator<Item = f32> + '_ {
        self.data.iter().copied().filter(|v| !self.is_nodata(*v))
    }

    /// Number of cells holding data.
    pub fn valid_count(&self) -> usize {
        self.valid_values().count()
    }

    /// Minimum and maximum over valid, finite cells.
    pub fn value_range(&self) -> Option<(f32, f32)> {
        self.valid_values()
            .filter(|v| v.is_finite())
            .fold(None, |range, v| match range {
                None => Some((v, v)),
                Some((min, max)) => Some((min.min(v), max.max(v))),
            })
    }

    /// Map coordinates of a cell's upper-left corner.
    pub fn pixel_to_utm(&self, row: f64, col: f64) -> (f64, f64) {
        (self.header.col_to_utm_x(col), self.header.row_to_utm_y(row))
    }

    /// Fractional (row, col) position of a map coordinate.
    pub fn utm_to_pixel(&self, x: f64, y: f64) -> (f64, f64) {
        (self.header.utm_y_to_row(y), self.header.utm_x_to_col(x))
    }

    /// Split into header and flat buffer.
    pub fn into_parts(self) -> (RasterHeader, Vec<f32>) {
        (self.header, self.data)
    }
}
