//! Closed-form steady-state relief of a nonlinear-diffusion hillslope.
//!
//! With `A = 2·E·ρr / (D·Sc·ρs)` the relief over a hillslope of length `L` is
//!
//! ```text
//! R = Sc · (−1 + √(1 + A²L²) + ln 3 − ln(2 + √(1 + A²L²))) / A
//! ```
//!
//! `Sc` is the only free parameter; the constants come from
//! [`PhysicalConstants`]. The expression is undefined at `Sc = 0`.

use crate::config::PhysicalConstants;

/// The scale factor `A` (1/m).
pub fn scale_factor(constants: &PhysicalConstants, critical_gradient: f64) -> f64 {
    (2.0 * constants.erosion_rate * constants.rock_density)
        / (constants.diffusivity * critical_gradient * constants.soil_density)
}

/// Relief (m) predicted for a hillslope of `length` metres.
pub fn model(length: f64, constants: &PhysicalConstants, critical_gradient: f64) -> f64 {
    let a = scale_factor(constants, critical_gradient);
    let root = (1.0 + a * a * length * length).sqrt();
    critical_gradient * (-1.0 + root + 3.0_f64.ln() - (2.0 + root).ln()) / a
}
