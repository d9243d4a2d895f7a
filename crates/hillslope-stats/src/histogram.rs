//! Equal-width histograms and their position relative to median ± MAD.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StatsError};

/// Counts over `bins` equal-width bins.
///
/// `edges` has one more entry than `counts`. Every bin is half open except
/// the last, which also holds values equal to the final edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn bin_count(&self) -> usize {
        self.counts.len()
    }

    /// `(left, right)` edges of bin `i`.
    pub fn bin_edges(&self, i: usize) -> Option<(f64, f64)> {
        Some((*self.edges.get(i)?, *self.edges.get(i + 1)?))
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Where a bin lies relative to the median ± MAD band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinClass {
    /// The right edge is below `median - mad`.
    Below,
    /// The bin overlaps the band.
    Within,
    /// The left edge is above `median + mad`.
    Above,
}

/// Histogram spanning the data range.
///
/// Constant data gets the range `value ± 0.5`.
pub fn histogram(data: &[f64], bins: usize) -> Result<Histogram> {
    if bins == 0 {
        return Err(StatsError::invalid_input("histogram needs at least one bin"));
    }
    if data.is_empty() {
        return Err(StatsError::empty("histogram of no values"));
    }
    if data.iter().any(|v| !v.is_finite()) {
        return Err(StatsError::invalid_input("histogram of non-finite data"));
    }

    let mut lo = data.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }

    let width = hi - lo;
    let edges: Vec<f64> = (0..=bins)
        .map(|i| lo + width * i as f64 / bins as f64)
        .collect();

    let mut counts = vec![0usize; bins];
    for &value in data {
        let mut idx = (((value - lo) / width) * bins as f64) as usize;
        if idx >= bins {
            idx = bins - 1;
        }
        // floating point can put a value on the wrong side of an edge
        if value < edges[idx] && idx > 0 {
            idx -= 1;
        } else if value >= edges[idx + 1] && idx + 1 < bins {
            idx += 1;
        }
        counts[idx] += 1;
    }

    Ok(Histogram { edges, counts })
}

/// Classify every bin of `histogram` against `median ± mad`.
pub fn classify_bins(histogram: &Histogram, median: f64, mad: f64) -> Vec<BinClass> {
    let low = median - mad;
    let high = median + mad;
    histogram
        .edges
        .windows(2)
        .map(|edge| {
            if edge[1] < low {
                BinClass::Below
            } else if edge[0] > high {
                BinClass::Above
            } else {
                BinClass::Within
            }
        })
        .collect()
}
