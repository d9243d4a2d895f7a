//! Test data generators for creating synthetic terrain and hilltop data.
//!
//! These generators create predictable, verifiable test data patterns
//! that can be used across the test suite.

/// Number of comma-separated fields in a generated hilltop-data row.
///
/// Matches the width of the upstream `*_HilltopData.csv` writer.
pub const HILLTOP_FIELDS: usize = 14;

/// Header line written at the top of generated hilltop-data files.
pub const HILLTOP_CSV_HEADER: &str =
    "X,Y,hilltop_id,S,R,Lh,BC,a,E,Cht,EucDist,s1,s2,s3";

/// Creates a test grid with predictable values.
///
/// Each cell value is calculated as: `col * 1000 + row`
///
/// This makes it easy to verify that data is being read/written correctly
/// by checking that grid[row][col] == col * 1000 + row.
///
/// # Arguments
///
/// * `width` - Number of columns
/// * `height` - Number of rows
///
/// # Returns
///
/// A `Vec<f32>` in row-major order (row 0 first, then row 1, etc.)
///
/// # Example
///
/// ```
/// use test_utils::create_test_grid;
///
/// let grid = create_test_grid(10, 5);
/// assert_eq!(grid.len(), 50); // 10 * 5
/// assert_eq!(grid[0], 0.0);   // col=0, row=0 -> 0*1000 + 0
/// assert_eq!(grid[1], 1000.0); // col=1, row=0 -> 1*1000 + 0
/// assert_eq!(grid[10], 1.0);  // col=0, row=1 -> 0*1000 + 1
/// ```
pub fn create_test_grid(width: usize, height: usize) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            data.push((col * 1000 + row) as f32);
        }
    }
    data
}

/// Creates a DEM-like grid with a single north-south ridge.
///
/// Elevation peaks at `peak` metres along the middle column and falls off
/// linearly to `peak - relief` at the east and west edges.
pub fn create_ridge_grid(width: usize, height: usize, peak: f32, relief: f32) -> Vec<f32> {
    let centre = (width.max(1) - 1) as f32 / 2.0;
    let half_width = centre.max(1.0);
    let mut data = Vec::with_capacity(width * height);
    for _row in 0..height {
        for col in 0..width {
            let distance = (col as f32 - centre).abs() / half_width;
            data.push(peak - relief * distance);
        }
    }
    data
}

/// Creates a test grid where every `stride`-th cell holds `nodata`.
///
/// Remaining cells follow [`create_test_grid`].
pub fn create_grid_with_nodata(width: usize, height: usize, nodata: f32, stride: usize) -> Vec<f32> {
    let stride = stride.max(1);
    create_test_grid(width, height)
        .into_iter()
        .enumerate()
        .map(|(i, v)| if i % stride == 0 { nodata } else { v })
        .collect()
}

/// Encode values as a little-endian `.flt` payload.
pub fn flt_payload(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

/// Formats one hilltop-data row.
///
/// Only the consumed columns carry meaningful values: 4 relief, 5 length,
/// 8 hilltop slope, 13 Euclidean distance. The rest hold row-derived filler.
pub fn hilltop_csv_row(
    id: usize,
    relief: f64,
    length: f64,
    hilltop_slope: f64,
    euclidean_distance: f64,
) -> String {
    let mut fields: Vec<String> = (0..HILLTOP_FIELDS).map(|c| format!("{}", c * 10 + id)).collect();
    fields[4] = format!("{}", relief);
    fields[5] = format!("{}", length);
    fields[8] = format!("{}", hilltop_slope);
    fields[13] = format!("{}", euclidean_distance);
    fields.join(",")
}

/// Builds a complete hilltop-data file from `(length, relief)` pairs.
///
/// Every row passes the default sample filter: slope 0.5 and a Euclidean
/// distance equal to the flow length.
pub fn hilltop_csv_text(samples: &[(f64, f64)]) -> String {
    let mut text = String::from(HILLTOP_CSV_HEADER);
    text.push('\n');
    for (id, &(length, relief)) in samples.iter().enumerate() {
        text.push_str(&hilltop_csv_row(id, relief, length, 0.5, length));
        text.push('\n');
    }
    text
}

/// Evenly spaced hillslope lengths: `start + i * step` for `i < count`.
pub fn hillslope_lengths(start: f64, step: f64, count: usize) -> Vec<f64> {
    (0..count).map(|i| start + step * i as f64).collect()
}
