//! Writing float rasters back to `.hdr` / `.flt` pairs.

use std::path::Path;

use bytes::{BufMut, Bytes, BytesMut};
use tracing::info;

use crate::error::Result;
use crate::grid::RasterGrid;
use crate::reader::{flt_paths, CELL_BYTES};

/// Encode the grid values in the byte order its header declares.
pub fn encode_payload(grid: &RasterGrid) -> Bytes {
    let big_endian = grid.header().byte_order.is_big_endian();
    let mut buf = BytesMut::with_capacity(grid.data().len() * CELL_BYTES);
    for &value in grid.data() {
        if big_endian {
            buf.put_f32(value);
        } else {
            buf.put_f32_le(value);
        }
    }
    buf.freeze()
}

/// Write the header sidecar and payload next to each other.
///
/// `path` may name either the `.flt` or the `.hdr` file.
pub fn write_flt(path: impl AsRef<Path>, grid: &RasterGrid) -> Result<()> {
    let (hdr_path, flt_path) = flt_paths(path)?;
    std::fs::write(&hdr_path, grid.header().to_hdr_string())?;
    std::fs::write(&flt_path, encode_payload(grid))?;
    info!(
        path = %flt_path.display(),
        rows = grid.nrows(),
        cols = grid.ncols(),
        "Wrote float raster"
    );
    Ok(())
}
