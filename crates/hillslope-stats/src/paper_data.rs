//! Reader for the whitespace-delimited table of per-basin hillslope length
//! estimates.
//!
//! Each row holds three estimates of the same basin from different methods.
//! Values of 2 m or less are processing artifacts and are dropped per column,
//! so the three series can differ in length.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, StatsError};

/// Column of the hilltop flow routing estimate.
pub const HILLTOP_FLOW_ROUTING_COLUMN: usize = 2;
/// Column of the slope-area estimate.
pub const SLOPE_AREA_COLUMN: usize = 9;
/// Column of the drainage density estimate.
pub const DRAINAGE_DENSITY_COLUMN: usize = 11;

/// Estimates at or below this are discarded.
pub const ARTIFACT_THRESHOLD: f64 = 2.0;

/// Hillslope length estimates (m) grouped by method.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LengthEstimates {
    pub hilltop_flow_routing: Vec<f64>,
    pub slope_area: Vec<f64>,
    pub drainage_density: Vec<f64>,
}

impl LengthEstimates {
    /// The three series with their method names.
    pub fn methods(&self) -> [(&'static str, &[f64]); 3] {
        [
            ("Hilltop Flow Routing", self.hilltop_flow_routing.as_slice()),
            ("Slope-Area", self.slope_area.as_slice()),
            ("Drainage Density", self.drainage_density.as_slice()),
        ]
    }
}

/// Read length estimates from a file.
pub fn read_length_estimates(path: impl AsRef<Path>) -> Result<LengthEstimates> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let estimates = parse_length_estimates(BufReader::new(file))?;
    info!(
        path = %path.display(),
        hilltop_flow_routing = estimates.hilltop_flow_routing.len(),
        slope_area = estimates.slope_area.len(),
        drainage_density = estimates.drainage_density.len(),
        "Read hillslope length estimates"
    );
    Ok(estimates)
}

/// Parse length estimates, skipping the header line and blank lines.
pub fn parse_length_estimates<R: BufRead>(reader: R) -> Result<LengthEstimates> {
    let mut estimates = LengthEstimates::default();
    let mut rows = 0usize;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if index == 0 || line.trim().is_empty() {
            continue;
        }
        let line_no = index + 1;
        let fields: Vec<&str> = line.split_whitespace().collect();
        rows += 1;

        let hfr = column(&fields, HILLTOP_FLOW_ROUTING_COLUMN, line_no)?;
        let sa = column(&fields, SLOPE_AREA_COLUMN, line_no)?;
        let dd = column(&fields, DRAINAGE_DENSITY_COLUMN, line_no)?;

        if hfr > ARTIFACT_THRESHOLD {
            estimates.hilltop_flow_routing.push(hfr);
        }
        if sa > ARTIFACT_THRESHOLD {
            estimates.slope_area.push(sa);
        }
        if dd > ARTIFACT_THRESHOLD {
            estimates.drainage_density.push(dd);
        }
    }

    debug!(rows, "Parsed length estimate rows");
    Ok(estimates)
}

fn column(fields: &[&str], index: usize, line: usize) -> Result<f64> {
    let raw = fields.get(index).copied().unwrap_or("");
    raw.parse::<f64>()
        .map_err(|_| StatsError::format(line, index, raw))
}
