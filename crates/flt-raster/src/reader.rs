//! Reading `.flt` payloads.

use std::path::{Path, PathBuf};

use bytes::Buf;
use tracing::{info, warn};

use crate::error::{RasterError, Result};
use crate::grid::RasterGrid;
use crate::header::{read_header, RasterHeader};

/// Size of one cell on disk.
pub const CELL_BYTES: usize = 4;

/// Read the binary payload paired with `header`.
pub fn read_grid(path: impl AsRef<Path>, header: &RasterHeader) -> Result<RasterGrid> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    let grid = decode_payload(&data, header)?;
    info!(
        path = %path.display(),
        rows = grid.nrows(),
        cols = grid.ncols(),
        "Read float raster"
    );
    Ok(grid)
}

/// Decode a payload of 32-bit floats into a grid.
///
/// Values are decoded with an explicit byte order, so the result does not
/// depend on the host. The payload is little-endian unless the header
/// declares `MSBFIRST`.
pub fn decode_payload(data: &[u8], header: &RasterHeader) -> Result<RasterGrid> {
    let expected = header.checked_cell_count()?;
    if data.len() != expected * CELL_BYTES {
        return Err(RasterError::shape(expected, data.len()));
    }

    let big_endian = header.byte_order.is_big_endian();
    if big_endian {
        warn!("Header declares MSBFIRST, decoding payload as big-endian");
    }

    let mut buf = data;
    let mut values = Vec::with_capacity(expected);
    while buf.has_remaining() {
        let value = if big_endian {
            buf.get_f32()
        } else {
            buf.get_f32_le()
        };
        values.push(value);
    }

    RasterGrid::new(header.clone(), values)
}

/// Read a float raster from either its `.flt` or `.hdr` path.
pub fn read_flt(path: impl AsRef<Path>) -> Result<RasterGrid> {
    let (hdr_path, flt_path) = flt_paths(path)?;
    let header = read_header(&hdr_path)?;
    read_grid(&flt_path, &header)
}

/// Resolve the `.hdr` and `.flt` siblings of a raster path.
pub fn flt_paths(path: impl AsRef<Path>) -> Result<(PathBuf, PathBuf)> {
    let path = path.as_ref();
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("flt") | Some("hdr") => Ok((path.with_extension("hdr"), path.with_extension("flt"))),
        _ => Err(RasterError::InvalidPath(path.display().to_string())),
    }
}
