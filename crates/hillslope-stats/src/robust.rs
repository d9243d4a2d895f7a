//! Outlier-resistant location and spread.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StatsError};

/// Median and median absolute deviation of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub median: f64,
    pub mad: f64,
    pub count: usize,
}

impl Summary {
    /// `(median - mad, median + mad)`.
    pub fn mad_band(&self) -> (f64, f64) {
        (self.median - self.mad, self.median + self.mad)
    }
}

/// Median, averaging the two middle values for even counts.
pub fn median(data: &[f64]) -> Result<f64> {
    let sorted = sorted_finite(data, "median")?;
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Ok((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Ok(sorted[mid])
    }
}

/// Median of the absolute deviations from the median.
pub fn median_absolute_deviation(data: &[f64]) -> Result<f64> {
    let centre = median(data)?;
    let deviations: Vec<f64> = data.iter().map(|v| (v - centre).abs()).collect();
    median(&deviations)
}

/// Median and MAD of `data`.
pub fn summarize(data: &[f64]) -> Result<Summary> {
    Ok(Summary {
        median: median(data)?,
        mad: median_absolute_deviation(data)?,
        count: data.len(),
    })
}

fn sorted_finite(data: &[f64], what: &str) -> Result<Vec<f64>> {
    if data.is_empty() {
        return Err(StatsError::empty(format!("{} of no values", what)));
    }
    if let Some(bad) = data.iter().find(|v| !v.is_finite()) {
        return Err(StatsError::invalid_input(format!(
            "{} of data containing {}",
            what, bad
        )));
    }
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);
    Ok(sorted)
}
