//! UTM tick marks for rasters displayed in pixel space.
//!
//! A raster image is drawn with column/row coordinates, but its axes should be
//! labelled with eastings and northings. The ticks generated here share one
//! spacing on both axes so the labels are isometric in map units, and the
//! spacing is rounded down to its leading digit (1234 m becomes 1000 m).

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{RasterError, Result};
use crate::header::RasterHeader;

/// A window of the raster in pixel (column, row) coordinates.
///
/// Rows grow downwards, so `y_min` is the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelViewport {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl PixelViewport {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// The whole raster.
    pub fn full(header: &RasterHeader) -> Self {
        Self::new(0.0, header.ncols as f64, 0.0, header.nrows as f64)
    }
}

/// One tick: where to draw it and what to print.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Position along the axis in pixel space.
    pub pixel: f64,
    /// Map coordinate of the tick.
    pub utm: f64,
    /// Integer part of `utm`.
    pub label: String,
}

/// Ticks for both axes of a raster plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickSpec {
    /// Rounded spacing in map units, shared by both axes.
    pub spacing: f64,
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
}

impl TickSpec {
    pub fn x_positions(&self) -> Vec<f64> {
        self.x_ticks.iter().map(|t| t.pixel).collect()
    }

    pub fn y_positions(&self) -> Vec<f64> {
        self.y_ticks.iter().map(|t| t.pixel).collect()
    }

    pub fn x_labels(&self) -> Vec<&str> {
        self.x_ticks.iter().map(|t| t.label.as_str()).collect()
    }

    pub fn y_labels(&self) -> Vec<&str> {
        self.y_ticks.iter().map(|t| t.label.as_str()).collect()
    }
}

/// Compute UTM-labelled ticks for `viewport`.
///
/// `target_tick_count` sets the candidate spacing (span / count); the larger
/// of the two axis candidates is used for both axes and `2 * target_tick_count`
/// ticks are produced per axis starting at the rounded minimum.
pub fn compute_tick_marks(
    header: &RasterHeader,
    viewport: &PixelViewport,
    target_tick_count: usize,
) -> Result<TickSpec> {
    if target_tick_count == 0 {
        return Err(RasterError::invalid_ticks("target tick count must be > 0"));
    }
    if !(header.cellsize.is_finite() && header.cellsize > 0.0) {
        return Err(RasterError::invalid_ticks(format!(
            "cellsize must be positive, got {}",
            header.cellsize
        )));
    }

    let x_min_utm = header.col_to_utm_x(viewport.x_min);
    let x_max_utm = header.col_to_utm_x(viewport.x_max);
    // the top pixel row is the largest northing
    let y_max_utm = header.row_to_utm_y(viewport.y_min);
    let y_min_utm = header.row_to_utm_y(viewport.y_max);

    let n = target_tick_count as f64;
    let dx_spacing = (x_max_utm - x_min_utm) / n;
    let mut dy_spacing = (y_max_utm - y_min_utm) / n;
    if dx_spacing > dy_spacing {
        dy_spacing = dx_spacing;
    }

    let (spacing, magnitude) = leading_digit_spacing(dy_spacing).ok_or_else(|| {
        RasterError::invalid_ticks(format!(
            "spacing {} rounds to zero for the requested window",
            dy_spacing
        ))
    })?;

    let x_start = truncate_to_magnitude(x_min_utm, magnitude);
    let y_start = truncate_to_magnitude(y_min_utm, magnitude);

    let count = 2 * target_tick_count;
    let mut x_ticks = Vec::with_capacity(count);
    let mut y_ticks = Vec::with_capacity(count);
    for i in 0..count {
        let offset = i as f64 * spacing;

        let x_utm = x_start + offset;
        x_ticks.push(Tick {
            pixel: header.utm_x_to_col(x_utm),
            utm: x_utm,
            label: integer_label(x_utm),
        });

        let y_utm = y_start + offset;
        y_ticks.push(Tick {
            pixel: header.utm_y_to_row(y_utm),
            utm: y_utm,
            label: integer_label(y_utm),
        });
    }

    debug!(
        spacing,
        x_start,
        y_start,
        count,
        "Computed UTM tick marks"
    );

    Ok(TickSpec {
        spacing,
        x_ticks,
        y_ticks,
    })
}

/// Round a spacing down to its leading digit.
///
/// Returns the rounded spacing and `10^(d-1)` where `d` is the number of
/// digits in the integer part, or `None` when the rounded spacing is not
/// strictly positive.
pub fn leading_digit_spacing(spacing: f64) -> Option<(f64, f64)> {
    if !spacing.is_finite() {
        return None;
    }
    let integer = spacing.trunc();
    if integer < 1.0 {
        return None;
    }

    let mut magnitude = 1.0_f64;
    while integer >= magnitude * 10.0 {
        magnitude *= 10.0;
    }
    let leading = (integer / magnitude).trunc();
    Some((leading * magnitude, magnitude))
}

/// Truncate the integer part of `value` to a multiple of `magnitude`, toward zero.
fn truncate_to_magnitude(value: f64, magnitude: f64) -> f64 {
    (value.trunc() / magnitude).trunc() * magnitude
}

/// Integer part of a coordinate, fraction discarded.
fn integer_label(value: f64) -> String {
    format!("{}", value.trunc() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_digit_spacing() {
        assert_eq!(leading_digit_spacing(1234.0), Some((1000.0, 1000.0)));
        assert_eq!(leading_digit_spacing(1234.9), Some((1000.0, 1000.0)));
        assert_eq!(leading_digit_spacing(80.0), Some((80.0, 10.0)));
        assert_eq!(leading_digit_spacing(9.99), Some((9.0, 1.0)));
        assert_eq!(leading_digit_spacing(10.0), Some((10.0, 10.0)));
        assert_eq!(leading_digit_spacing(999.0), Some((900.0, 100.0)));
        assert_eq!(leading_digit_spacing(0.5), None);
        assert_eq!(leading_digit_spacing(-20.0), None);
        assert_eq!(leading_digit_spacing(f64::NAN), None);
    }

    #[test]
    fn test_truncate_to_magnitude() {
        assert_eq!(truncate_to_magnitude(123456.7, 1000.0), 123000.0);
        assert_eq!(truncate_to_magnitude(441234.7, 100.0), 441200.0);
        assert_eq!(truncate_to_magnitude(-1234.5, 1000.0), -1000.0);
        assert_eq!(truncate_to_magnitude(4120000.0, 10.0), 4120000.0);
    }

    #[test]
    fn test_integer_label_discards_fraction() {
        assert_eq!(integer_label(441999.9), "441999");
        assert_eq!(integer_label(4120000.0), "4120000");
        assert_eq!(integer_label(-12.7), "-12");
    }

    #[test]
    fn test_full_raster_ticks() {
        let header = RasterHeader::new(400, 300, 441000.0, 4120000.0, 1.0, -9999.0);
        let spec = compute_tick_marks(&header, &PixelViewport::full(&header), 5).unwrap();

        // x span 400 / 5 = 80 beats y span 300 / 5 = 60
        assert_eq!(spec.spacing, 80.0);
        assert_eq!(spec.x_ticks.len(), 10);
        assert_eq!(spec.y_ticks.len(), 10);

        assert_eq!(spec.x_ticks[0].pixel, 0.0);
        assert_eq!(spec.x_ticks[0].label, "441000");
        assert_eq!(spec.x_ticks[1].pixel, 80.0);
        assert_eq!(spec.x_ticks[1].label, "441080");

        // the southern edge is the bottom row
        assert_eq!(spec.y_ticks[0].pixel, 300.0);
        assert_eq!(spec.y_ticks[0].label, "4120000");
        assert_eq!(spec.y_ticks[1].pixel, 220.0);
        assert_eq!(spec.y_ticks[1].label, "4120080");
    }

    #[test]
    fn test_rejects_zero_target() {
        let header = RasterHeader::new(10, 10, 0.0, 0.0, 1.0, -9999.0);
        assert!(matches!(
            compute_tick_marks(&header, &PixelViewport::full(&header), 0),
            Err(RasterError::InvalidTicks(_))
        ));
    }

    #[test]
    fn test_rejects_sub_unit_spacing() {
        let header = RasterHeader::new(2, 2, 0.0, 0.0, 1.0, -9999.0);
        assert!(matches!(
            compute_tick_marks(&header, &PixelViewport::full(&header), 5),
            Err(RasterError::InvalidTicks(_))
        ));
    }
}
