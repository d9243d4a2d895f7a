//! ESRI float raster reader for hillslope analysis.
//!
//! Rasters produced by the topographic analysis tools are stored as a pair
//! of files: a `.hdr` text sidecar with georeferencing and a `.flt` payload of
//! little-endian 32-bit floats, row-major with the northern row first.
//!
//! # Example
//!
//! ```ignore
//! use flt_raster::{compute_tick_marks, read_flt, PixelViewport};
//!
//! let hillshade = read_flt("OR_Clip_HS.flt")?;
//! let viewport = PixelViewport::full(hillshade.header());
//! let ticks = compute_tick_marks(hillshade.header(), &viewport, 5)?;
//!
//! for tick in &ticks.x_ticks {
//!     println!("{} -> {}", tick.pixel, tick.label);
//! }
//! ```

pub mod ascii;
pub mod error;
pub mod grid;
pub mod header;
pub mod reader;
pub mod ticks;
pub mod writer;

pub use ascii::{parse_ascii_grid, read_ascii_grid};
pub use error::{RasterError, Result};
pub use grid::RasterGrid;
pub use header::{parse_header, read_header, ByteOrder, RasterHeader};
pub use reader::{decode_payload, flt_paths, read_flt, read_grid};
pub use ticks::{compute_tick_marks, PixelViewport, Tick, TickSpec};
pub use writer::{encode_payload, write_flt};
