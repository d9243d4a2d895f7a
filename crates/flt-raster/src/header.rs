//! `.hdr` sidecar parsing for ESRI float rasters.
//!
//! The sidecar holds one `key value` pair per line in a fixed order:
//!
//! ```text
//! ncols         400
//! nrows         300
//! xllcorner     441000.0
//! yllcorner     4120000.0
//! cellsize      1.0
//! NODATA_value  -9999
//! byteorder     LSBFIRST
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{RasterError, Result};
use crate::reader::CELL_BYTES;

/// Header keys in the order they must appear.
pub const HEADER_KEYS: [&str; 7] = [
    "ncols",
    "nrows",
    "xllcorner",
    "yllcorner",
    "cellsize",
    "NODATA_value",
    "byteorder",
];

/// Byte order token of the binary payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ByteOrder {
    /// `LSBFIRST`, little-endian. The only order the upstream model writes.
    LsbFirst,
    /// `MSBFIRST`, big-endian.
    MsbFirst,
    /// Any other alphabetic token, kept verbatim.
    Other(String),
}

impl ByteOrder {
    /// Parse from the header token (case-insensitive).
    pub fn from_token(token: &str) -> Self {
        match token.to_ascii_uppercase().as_str() {
            "LSBFIRST" | "I" => Self::LsbFirst,
            "MSBFIRST" | "M" => Self::MsbFirst,
            _ => Self::Other(token.to_string()),
        }
    }

    /// Token written back to a header file.
    pub fn as_token(&self) -> &str {
        match self {
            Self::LsbFirst => "LSBFIRST",
            Self::MsbFirst => "MSBFIRST",
            Self::Other(token) => token,
        }
    }

    /// Whether the payload should be decoded big-endian.
    pub fn is_big_endian(&self) -> bool {
        matches!(self, Self::MsbFirst)
    }
}

impl Default for ByteOrder {
    fn default() -> Self {
        Self::LsbFirst
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

/// Georeferencing and layout of a raster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RasterHeader {
    /// Number of columns.
    pub ncols: usize,
    /// Number of rows.
    pub nrows: usize,
    /// Easting of the lower-left corner.
    pub xllcorner: f64,
    /// Northing of the lower-left corner.
    pub yllcorner: f64,
    /// Cell edge length in map units.
    pub cellsize: f64,
    /// Value marking cells without data.
    pub nodata_value: f64,
    /// Byte order of the binary payload.
    pub byte_order: ByteOrder,
}

impl RasterHeader {
    /// Create a little-endian header.
    pub fn new(
        ncols: usize,
        nrows: usize,
        xllcorner: f64,
        yllcorner: f64,
        cellsize: f64,
        nodata_value: f64,
    ) -> Self {
        Self {
            ncols,
            nrows,
            xllcorner,
            yllcorner,
            cellsize,
            nodata_value,
            byte_order: ByteOrder::LsbFirst,
        }
    }

    /// Total number of cells, or `None` if it overflows `usize`.
    pub fn cell_count(&self) -> Option<usize> {
        self.ncols.checked_mul(self.nrows)
    }

    /// Size of the binary payload in bytes, or `None` if it overflows `usize`.
    pub fn payload_bytes(&self) -> Option<usize> {
        self.cell_count()?.checked_mul(CELL_BYTES)
    }

    /// Cell count, or `TooLarge` if the grid cannot be addressed.
    pub(crate) fn checked_cell_count(&self) -> Result<usize> {
        self.payload_bytes()
            .map(|bytes| bytes / CELL_BYTES)
            .ok_or(RasterError::TooLarge {
                ncols: self.ncols,
                nrows: self.nrows,
            })
    }

    /// Easting of a (possibly fractional) column position.
    pub fn col_to_utm_x(&self, col: f64) -> f64 {
        self.xllcorner + col * self.cellsize
    }

    /// Northing of a (possibly fractional) row position.
    ///
    /// Rows are counted from the top while the origin is the lower-left corner.
    pub fn row_to_utm_y(&self, row: f64) -> f64 {
        self.yllcorner + (self.nrows as f64 - row) * self.cellsize
    }

    /// Column position of an easting.
    pub fn utm_x_to_col(&self, x: f64) -> f64 {
        (x - self.xllcorner) / self.cellsize
    }

    /// Row position of a northing.
    pub fn utm_y_to_row(&self, y: f64) -> f64 {
        self.nrows as f64 - (y - self.yllcorner) / self.cellsize
    }

    /// Render the header in `.hdr` form.
    pub fn to_hdr_string(&self) -> String {
        format!(
            "ncols {}\nnrows {}\nxllcorner {}\nyllcorner {}\ncellsize {}\nNODATA_value {}\nbyteorder {}\n",
            self.ncols,
            self.nrows,
            self.xllcorner,
            self.yllcorner,
            self.cellsize,
            self.nodata_value,
            self.byte_order
        )
    }
}

/// Read and parse a `.hdr` sidecar.
pub fn read_header(path: impl AsRef<Path>) -> Result<RasterHeader> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let header = parse_header(&text)?;
    debug!(
        path = %path.display(),
        ncols = header.ncols,
        nrows = header.nrows,
        "Parsed raster header"
    );
    Ok(header)
}

/// Parse `.hdr` text.
pub fn parse_header(text: &str) -> Result<RasterHeader> {
    let (fields, consumed) = header_fields(text, &HEADER_KEYS)?;
    let trailing = text
        .lines()
        .skip(consumed)
        .filter(|line| !line.trim().is_empty())
        .count();
    if trailing > 0 {
        debug!(trailing, "Ignoring trailing header lines");
    }

    let ncols = parse_dimension(&fields[0])?;
    let nrows = parse_dimension(&fields[1])?;
    let xllcorner = parse_number(&fields[2])?;
    let yllcorner = parse_number(&fields[3])?;
    let cellsize = parse_number(&fields[4])?;
    let nodata_value = parse_number(&fields[5])?;

    let order = &fields[6];
    if !order.value.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(RasterError::format(
            order.line,
            format!("byteorder must be an alphabetic token, found '{}'", order.value),
        ));
    }
    let byte_order = ByteOrder::from_token(&order.value);
    if let ByteOrder::Other(token) = &byte_order {
        warn!(token = %token, "Unknown byte order token, payload will be read as little-endian");
    }

    let header = RasterHeader {
        ncols,
        nrows,
        xllcorner,
        yllcorner,
        cellsize,
        nodata_value,
        byte_order,
    };
    check_size(&header, fields[1].line)?;
    Ok(header)
}

/// Reject dimensions whose cell or byte count overflows.
pub(crate) fn check_size(header: &RasterHeader, line: usize) -> Result<()> {
    if header.payload_bytes().is_none() {
        return Err(RasterError::format(
            line,
            format!(
                "{} x {} cells is too large to address",
                header.ncols, header.nrows
            ),
        ));
    }
    Ok(())
}

/// One `key value` line of a header.
#[derive(Debug, Clone)]
pub(crate) struct HeaderField {
    pub line: usize,
    pub value: String,
}

/// Collect the values for `keys`, in order, from the leading non-blank lines.
///
/// Returns the fields and the number of lines consumed, blank lines included.
pub(crate) fn header_fields(text: &str, keys: &[&str]) -> Result<(Vec<HeaderField>, usize)> {
    let mut fields = Vec::with_capacity(keys.len());
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line))
        .filter(|(_, line)| !line.trim().is_empty());

    for expected in keys {
        let (line_no, line) = lines.next().ok_or_else(|| {
            RasterError::format(
                text.lines().count() + 1,
                format!("missing '{}' line", expected),
            )
        })?;

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != 2 {
            return Err(RasterError::format(
                line_no,
                format!("expected 'key value', found '{}'", line.trim()),
            ));
        }
        if !tokens[0].eq_ignore_ascii_case(expected) {
            return Err(RasterError::format(
                line_no,
                format!("expected key '{}', found '{}'", expected, tokens[0]),
            ));
        }

        fields.push(HeaderField {
            line: line_no,
            value: tokens[1].to_string(),
        });
    }

    let consumed = fields.last().map(|field| field.line).unwrap_or(0);
    Ok((fields, consumed))
}

pub(crate) fn parse_number(field: &HeaderField) -> Result<f64> {
    field.value.parse::<f64>().map_err(|_| {
        RasterError::format(field.line, format!("'{}' is not a number", field.value))
    })
}

pub(crate) fn parse_dimension(field: &HeaderField) -> Result<usize> {
    let value = parse_number(field)?;
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 {
        return Err(RasterError::format(
            field.line,
            format!("'{}' is not a valid dimension", field.value),
        ));
    }
    Ok(value as usize)
}
