//! Levenberg-Marquardt minimization of a sum of squared residuals.
//!
//! The Jacobian is taken by forward differences, so a problem only has to
//! evaluate its residuals. A problem may refuse a parameter vector (for
//! example a non-positive gradient) by returning `None`; the solver treats
//! that like a step that increased the cost and raises the damping.

use nalgebra::{DMatrix, DVector};
use tracing::debug;

use crate::config::SolverConfig;
use crate::error::{FitError, Result};

/// Smallest diagonal entry used when scaling the damping term.
const MIN_DIAGONAL: f64 = 1e-12;

/// A nonlinear least-squares problem.
pub trait LeastSquaresProblem {
    /// Number of residuals returned by [`residuals`](Self::residuals).
    fn residual_count(&self) -> usize;

    /// Residuals at `params`, or `None` if `params` is outside the domain or
    /// any residual is not finite.
    fn residuals(&self, params: &DVector<f64>) -> Option<DVector<f64>>;
}

/// Outcome of a converged minimization.
#[derive(Debug, Clone)]
pub struct Solution {
    pub params: DVector<f64>,
    /// Half the sum of squared residuals at `params`.
    pub cost: f64,
    /// Steps taken, accepted or rejected.
    pub iterations: usize,
}

/// Levenberg-Marquardt solver.
#[derive(Debug, Clone, Default)]
pub struct LevenbergMarquardt {
    config: SolverConfig,
}

impl LevenbergMarquardt {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Minimize `problem` starting from `initial`.
    pub fn minimize<P: LeastSquaresProblem>(
        &self,
        problem: &P,
        initial: DVector<f64>,
    ) -> Result<Solution> {
        if problem.residual_count() == 0 {
            return Err(FitError::invalid_input("problem has no residuals"));
        }
        let mut residuals = evaluate(problem, &initial).ok_or_else(|| {
            FitError::NonFinite(format!("residuals at starting point {:?}", initial.as_slice()))
        })?;
        let mut params = initial;
        let mut cost = 0.5 * residuals.norm_squared();
        let mut lambda = self.config.initial_damping;
        let mut jacobian = forward_jacobian(problem, &params, &residuals)?;

        let mut iterations = 0;
        let mut converged = cost == 0.0;
        while !converged && iterations < self.config.max_iterations {
            iterations += 1;

            let jtj = jacobian.transpose() * &jacobian;
            let neg_gradient = -(jacobian.transpose() * &residuals);
            let mut damped = jtj.clone();
            for i in 0..damped.nrows() {
                damped[(i, i)] += lambda * jtj[(i, i)].max(MIN_DIAGONAL);
            }

            let Some(step) = damped.lu().solve(&neg_gradient) else {
                lambda *= 10.0;
                continue;
            };
            let small_step =
                step.norm() <= self.config.xtol * (params.norm() + self.config.xtol);
            let trial = &params + &step;

            let accepted = evaluate(problem, &trial)
                .map(|r| (0.5 * r.norm_squared(), r))
                .filter(|(trial_cost, _)| *trial_cost < cost);

            match accepted {
                Some((trial_cost, trial_residuals)) => {
                    let reduction = cost - trial_cost;
                    let previous = cost;
                    params = trial;
                    residuals = trial_residuals;
                    cost = trial_cost;
                    lambda = (lambda / 10.0).max(f64::MIN_POSITIVE);

                    debug!(iteration = iterations, cost, lambda, "Accepted step");

                    converged =
                        cost == 0.0 || small_step || reduction <= self.config.ftol * previous;
                    if !converged {
                        jacobian = forward_jacobian(problem, &params, &residuals)?;
                    }
                }
                None => {
                    converged = small_step;
                    lambda *= 10.0;
                    debug!(iteration = iterations, lambda, "Rejected step");
                }
            }
        }

        if !converged {
            return Err(FitError::Convergence { iterations });
        }
        Ok(Solution {
            params,
            cost,
            iterations,
        })
    }
}

/// Residuals with every entry finite, or `None`.
fn evaluate<P: LeastSquaresProblem>(problem: &P, params: &DVector<f64>) -> Option<DVector<f64>> {
    problem
        .residuals(params)
        .filter(|r| r.len() == problem.residual_count() && r.iter().all(|v| v.is_finite()))
}

/// Forward-difference Jacobian, falling back to a backward difference when
/// the forward point is outside the problem's domain.
fn forward_jacobian<P: LeastSquaresProblem>(
    problem: &P,
    params: &DVector<f64>,
    residuals: &DVector<f64>,
) -> Result<DMatrix<f64>> {
    let eps = f64::EPSILON.sqrt();
    let mut jacobian = DMatrix::zeros(residuals.len(), params.len());

    for j in 0..params.len() {
        let h = eps * params[j].abs().max(1.0);
        let mut shifted = params.clone();
        shifted[j] += h;
        let column = match evaluate(problem, &shifted) {
            Some(r) => (r - residuals) / h,
            None => {
                shifted[j] = params[j] - h;
                let r = evaluate(problem, &shifted).ok_or_else(|| {
                    FitError::NonFinite(format!("Jacobian around parameter {}", j))
                })?;
                (residuals - r) / h
            }
        };
        jacobian.set_column(j, &column);
    }
    Ok(jacobian)
}
