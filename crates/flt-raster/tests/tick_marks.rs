//! UTM tick marks for rasters of different shapes.

use flt_raster::{compute_tick_marks, PixelViewport, RasterError, RasterHeader};
use test_utils::grid::{GridSpec, LIDAR_CLIP, TALL_DEM};

fn header(spec: GridSpec) -> RasterHeader {
    RasterHeader::new(
        spec.ncols,
        spec.nrows,
        spec.xllcorner,
        spec.yllcorner,
        spec.cellsize,
        -9999.0,
    )
}

#[test]
fn test_tall_raster_uses_northing_spacing() {
    let header = header(TALL_DEM);
    let ticks = compute_tick_marks(&header, &PixelViewport::full(&header), 5).unwrap();

    // dx = 1000 / 5 = 200, dy = 2500 / 5 = 500
    assert_eq!(ticks.spacing, 500.0);
    assert_eq!(ticks.x_ticks.len(), 10);
    assert_eq!(ticks.y_ticks.len(), 10);

    assert_eq!(ticks.x_positions()[..3], [0.0, 50.0, 100.0]);
    assert_eq!(ticks.x_labels()[..3], ["500000", "500500", "501000"]);
    assert_eq!(ticks.y_positions()[..3], [250.0, 200.0, 150.0]);
    assert_eq!(ticks.y_labels()[..3], ["4000000", "4000500", "4001000"]);
}

#[test]
fn test_spacing_is_larger_axis_candidate() {
    for spec in [LIDAR_CLIP, TALL_DEM] {
        let header = header(spec);
        let ticks = compute_tick_marks(&header, &PixelViewport::full(&header), 3).unwrap();
        let dx = spec.ncols as f64 * spec.cellsize / 3.0;
        let dy = spec.nrows as f64 * spec.cellsize / 3.0;
        let candidate = dx.max(dy);
        assert!(ticks.spacing <= candidate);
        assert!(ticks.spacing * 10.0 > candidate);
        // equal steps on both axes
        assert_eq!(
            ticks.x_ticks[1].utm - ticks.x_ticks[0].utm,
            ticks.y_ticks[1].utm - ticks.y_ticks[0].utm
        );
    }
}

#[test]
fn test_zoomed_viewport() {
    let header = header(LIDAR_CLIP);
    let viewport = PixelViewport::new(123.4, 323.4, 50.0, 250.0);
    let ticks = compute_tick_marks(&header, &viewport, 4).unwrap();

    assert_eq!(ticks.spacing, 50.0);
    assert_eq!(ticks.x_ticks.len(), 8);
    assert_eq!(ticks.x_labels()[..2], ["441120", "441170"]);
    assert!((ticks.x_ticks[0].pixel - 120.0).abs() < 1e-6);
    assert_eq!(ticks.y_labels()[..2], ["4120050", "4120100"]);
    assert_eq!(ticks.y_positions()[..2], [250.0, 200.0]);
}

#[test]
fn test_deterministic() {
    let header = header(LIDAR_CLIP);
    let viewport = PixelViewport::new(10.0, 390.0, 5.0, 295.0);
    let first = compute_tick_marks(&header, &viewport, 6).unwrap();
    let second = compute_tick_marks(&header, &viewport, 6).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_labels_truncate_fractions() {
    let header = RasterHeader::new(400, 300, 441000.75, 4120000.25, 1.0, -9999.0);
    let ticks = compute_tick_marks(&header, &PixelViewport::full(&header), 5).unwrap();
    assert_eq!(ticks.x_ticks[0].label, "441000");
    assert_eq!(ticks.y_ticks[0].label, "4120000");
    // the rounded start lies just outside the raster
    assert!(ticks.x_ticks[0].pixel < 0.0);
    assert!(ticks.y_ticks[0].pixel > 300.0);
}

#[test]
fn test_zero_cellsize_is_rejected() {
    let header = RasterHeader::new(10, 10, 0.0, 0.0, 0.0, -9999.0);
    assert!(matches!(
        compute_tick_marks(&header, &PixelViewport::full(&header), 5),
        Err(RasterError::InvalidTicks(_))
    ));
}
