//! Fitting the critical gradient of the nonlinear hillslope relief-length
//! relation to traced hilltop data.
//!
//! # Example
//!
//! ```ignore
//! use relief_fit::{filter_samples, fit, read_hilltop_csv, PhysicalConstants, SampleFilter};
//!
//! let records = read_hilltop_csv("CR2_HilltopData.csv")?;
//! let samples = filter_samples(&records, &SampleFilter::default())?;
//! let result = fit(&samples, &PhysicalConstants::default(), 0.8)?;
//!
//! println!("Sc = {:.2}, R^2 = {:.2}", result.critical_gradient, result.r_squared);
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod fit;
pub mod hilltop;
pub mod model;
pub mod solver;

pub use config::{PhysicalConstants, SampleFilter, SolverConfig};
pub use error::{FitError, Result};
pub use filter::{filter_samples, FitSample};
pub use fit::{fit, fit_with, modeled_curve, r_squared, FitReport, FitResult};
pub use hilltop::{parse_hilltop_csv, read_hilltop_csv, HilltopRecord};
pub use model::{model, scale_factor};
pub use solver::{LeastSquaresProblem, LevenbergMarquardt, Solution};
