//! Modal hillslope length from a Gaussian kernel density estimate.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, StatsError};

/// Settings for [`max_probability_kde`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KdeConfig {
    /// Number of evaluation points between the data minimum and maximum.
    pub bins: usize,
}

impl Default for KdeConfig {
    fn default() -> Self {
        Self { bins: 100 }
    }
}

impl KdeConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.bins == 0 {
            return Err("bins must be > 0".to_string());
        }
        Ok(())
    }
}

/// One-dimensional Gaussian KDE with Scott's bandwidth.
#[derive(Debug, Clone)]
pub struct GaussianKde {
    data: Vec<f64>,
    bandwidth: f64,
}

impl GaussianKde {
    /// Needs at least two finite values with non-zero spread.
    pub fn new(data: &[f64]) -> Result<Self> {
        if data.len() < 2 {
            return Err(StatsError::empty("a density estimate needs two or more values"));
        }
        if data.iter().any(|v| !v.is_finite()) {
            return Err(StatsError::invalid_input("density estimate of non-finite data"));
        }

        let n = data.len() as f64;
        let mean = data.iter().sum::<f64>() / n;
        let variance = data.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
        if !(variance > 0.0) {
            return Err(StatsError::invalid_input("density estimate of constant data"));
        }

        let scott_factor = n.powf(-1.0 / 5.0);
        Ok(Self {
            data: data.to_vec(),
            bandwidth: scott_factor * variance.sqrt(),
        })
    }

    /// Kernel standard deviation.
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Probability density at `x`.
    pub fn evaluate(&self, x: f64) -> f64 {
        let norm = self.data.len() as f64 * self.bandwidth * (2.0 * std::f64::consts::PI).sqrt();
        self.data
            .iter()
            .map(|v| {
                let z = (x - v) / self.bandwidth;
                (-0.5 * z * z).exp()
            })
            .sum::<f64>()
            / norm
    }

    pub fn min(&self) -> f64 {
        self.data.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max(&self) -> f64 {
        self.data.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

/// Positions of the highest density.
///
/// The density is evaluated at `min + i * (max - min) / bins` for
/// `i < bins`, so the data maximum itself is never a candidate. Every
/// position sharing the maximum density is returned, in ascending order.
pub fn max_probability_kde(data: &[f64], config: &KdeConfig) -> Result<Vec<f64>> {
    config.validate().map_err(StatsError::InvalidInput)?;
    let kde = GaussianKde::new(data)?;

    let min = kde.min();
    let step = (kde.max() - min) / config.bins as f64;
    let positions: Vec<f64> = (0..config.bins).map(|i| min + i as f64 * step).collect();
    let densities: Vec<f64> = positions.iter().map(|&x| kde.evaluate(x)).collect();

    let modes: Vec<f64> = max_indices(&densities)
        .into_iter()
        .map(|i| positions[i])
        .collect();
    debug!(
        bandwidth = kde.bandwidth(),
        bins = config.bins,
        modes = modes.len(),
        "Evaluated kernel density"
    );
    Ok(modes)
}

/// Indices of every element equal to the maximum. `NaN`s never match.
pub fn max_indices(values: &[f64]) -> Vec<usize> {
    let max = values
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(f64::NEG_INFINITY, f64::max);
    values
        .iter()
        .enumerate()
        .filter(|&(_, &v)| v == max)
        .map(|(i, _)| i)
        .collect()
}
