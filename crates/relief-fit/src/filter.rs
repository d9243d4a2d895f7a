//! Selection of hilltop records that satisfy the model's assumptions.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SampleFilter;
use crate::error::{FitError, Result};
use crate::hilltop::HilltopRecord;

/// A (length, relief) pair entering the fit, in metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitSample {
    pub length: f64,
    pub relief: f64,
}

impl FitSample {
    pub fn new(length: f64, relief: f64) -> Self {
        Self { length, relief }
    }
}

impl From<(f64, f64)> for FitSample {
    fn from((length, relief): (f64, f64)) -> Self {
        Self::new(length, relief)
    }
}

impl SampleFilter {
    /// Whether `record` passes every bound.
    ///
    /// The Euclidean ratio band drops flow paths that bend away from a straight
    /// ridge to channel line.
    pub fn accepts(&self, record: &HilltopRecord) -> bool {
        if !(record.length > self.length_min && record.relief > self.relief_min) {
            return false;
        }
        if !(record.hilltop_slope < self.slope_max) {
            return false;
        }
        let ratio = record.euclidean_distance / record.length;
        let (low, high) = self.euclidean_ratio_band;
        ratio > low && ratio < high
    }
}

/// Keep the records `filter` accepts, in input order.
///
/// An invalid filter is rejected before any record is looked at.
pub fn filter_samples(records: &[HilltopRecord], filter: &SampleFilter) -> Result<Vec<FitSample>> {
    filter.validate().map_err(FitError::InvalidInput)?;

    let samples: Vec<FitSample> = records
        .iter()
        .filter(|r| filter.accepts(r))
        .map(|r| FitSample::new(r.length, r.relief))
        .collect();
    debug!(
        kept = samples.len(),
        dropped = records.len() - samples.len(),
        "Filtered hilltop records"
    );
    Ok(samples)
}
