//! Fitting the critical gradient to observed hillslope relief.

use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{PhysicalConstants, SolverConfig};
use crate::error::{FitError, Result};
use crate::filter::FitSample;
use crate::model::model;
use crate::solver::{LeastSquaresProblem, LevenbergMarquardt};

/// Fitted critical gradient and its goodness of fit.
///
/// `r_squared` is `NaN` when the observed relief has no spread, as with a
/// single sample or identical relief values. The gradient is still valid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub critical_gradient: f64,
    pub r_squared: f64,
}

/// A fit together with everything needed to reproduce it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitReport {
    pub result: FitResult,
    pub constants: PhysicalConstants,
    pub sample_count: usize,
    pub iterations: usize,
    pub initial_guess: f64,
}

impl FitReport {
    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Residuals `model(L) - R` over a sample set.
struct ReliefProblem<'a> {
    samples: &'a [FitSample],
    constants: &'a PhysicalConstants,
}

impl LeastSquaresProblem for ReliefProblem<'_> {
    fn residual_count(&self) -> usize {
        self.samples.len()
    }

    fn residuals(&self, params: &DVector<f64>) -> Option<DVector<f64>> {
        let critical_gradient = params[0];
        if !(critical_gradient > 0.0) {
            return None;
        }
        let residuals = DVector::from_iterator(
            self.samples.len(),
            self.samples
                .iter()
                .map(|s| model(s.length, self.constants, critical_gradient) - s.relief),
        );
        residuals.iter().all(|r| r.is_finite()).then_some(residuals)
    }
}

/// Fit the critical gradient with the default solver settings.
///
/// See [`FitResult`] for when `r_squared` is `NaN`.
pub fn fit(
    samples: &[FitSample],
    constants: &PhysicalConstants,
    initial_guess: f64,
) -> Result<FitResult> {
    fit_with(samples, constants, initial_guess, &SolverConfig::default()).map(|r| r.result)
}

/// Fit the critical gradient and report how the fit was obtained.
pub fn fit_with(
    samples: &[FitSample],
    constants: &PhysicalConstants,
    initial_guess: f64,
    solver: &SolverConfig,
) -> Result<FitReport> {
    if samples.is_empty() {
        return Err(FitError::invalid_input("no samples to fit"));
    }
    if !(initial_guess.is_finite() && initial_guess > 0.0) {
        return Err(FitError::invalid_input(format!(
            "initial guess must be finite and > 0, got {}",
            initial_guess
        )));
    }
    constants.validate().map_err(FitError::InvalidInput)?;
    solver.validate().map_err(FitError::InvalidInput)?;
    if let Some(bad) = samples
        .iter()
        .find(|s| !(s.length.is_finite() && s.relief.is_finite()))
    {
        return Err(FitError::invalid_input(format!(
            "sample ({}, {}) is not finite",
            bad.length, bad.relief
        )));
    }

    let problem = ReliefProblem { samples, constants };
    if problem
        .residuals(&DVector::from_element(1, initial_guess))
        .is_none()
    {
        return Err(FitError::NonFinite(format!(
            "model at initial guess {}",
            initial_guess
        )));
    }

    debug!(
        samples = samples.len(),
        initial_guess,
        "Fitting critical gradient"
    );

    let solution = LevenbergMarquardt::new(*solver)
        .minimize(&problem, DVector::from_element(1, initial_guess))?;
    let critical_gradient = solution.params[0];
    let r_squared = r_squared(samples, constants, critical_gradient);

    info!(
        critical_gradient,
        r_squared,
        samples = samples.len(),
        iterations = solution.iterations,
        "Fitted relief-length relation"
    );

    Ok(FitReport {
        result: FitResult {
            critical_gradient,
            r_squared,
        },
        constants: *constants,
        sample_count: samples.len(),
        iterations: solution.iterations,
        initial_guess,
    })
}

/// Coefficient of determination of the model at `critical_gradient`.
///
/// `1 - SS_res / SS_tot` with the total sum of squares taken about the mean
/// observed relief. Samples with no spread give `NaN`.
pub fn r_squared(samples: &[FitSample], constants: &PhysicalConstants, critical_gradient: f64) -> f64 {
    if samples.is_empty() {
        return f64::NAN;
    }
    let mean = samples.iter().map(|s| s.relief).sum::<f64>() / samples.len() as f64;
    let (ss_res, ss_tot) = samples.iter().fold((0.0, 0.0), |(res, tot), s| {
        let modeled = model(s.length, constants, critical_gradient);
        (
            res + (modeled - s.relief).powi(2),
            tot + (s.relief - mean).powi(2),
        )
    });
    if ss_tot == 0.0 {
        return f64::NAN;
    }
    1.0 - ss_res / ss_tot
}

/// Modeled relief at each sample length, sorted by length for drawing.
pub fn modeled_curve(
    samples: &[FitSample],
    constants: &PhysicalConstants,
    critical_gradient: f64,
) -> Vec<(f64, f64)> {
    let mut curve: Vec<(f64, f64)> = samples
        .iter()
        .map(|s| (s.length, model(s.length, constants, critical_gradient)))
        .collect();
    curve.sort_by(|a, b| a.0.total_cmp(&b.0));
    curve
}
