//! Configuration for sample filtering and the relief-length fit.

use serde::{Deserialize, Serialize};

/// Physical constants held fixed across one fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalConstants {
    /// Hillslope sediment diffusivity `D` (m^2/yr).
    pub diffusivity: f64,

    /// Erosion rate `E` (mm/yr).
    pub erosion_rate: f64,

    /// Rock density `ρr` (kg/m^3).
    pub rock_density: f64,

    /// Soil density `ρs` (kg/m^3).
    pub soil_density: f64,
}

impl Default for PhysicalConstants {
    /// Published values for the Sierra Nevada site.
    fn default() -> Self {
        Self {
            diffusivity: 0.0086,
            erosion_rate: 0.25,
            rock_density: 2400.0,
            soil_density: 1400.0,
        }
    }
}

impl PhysicalConstants {
    pub fn new(diffusivity: f64, erosion_rate: f64, rock_density: f64, soil_density: f64) -> Self {
        Self {
            diffusivity,
            erosion_rate,
            rock_density,
            soil_density,
        }
    }

    /// Load constants from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(env_var)
    }

    /// Load constants from `lookup`, keyed by environment variable name.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(val) = parse_f64(&lookup, "RELIEF_FIT_DIFFUSIVITY") {
            config.diffusivity = val;
        }

        if let Some(val) = parse_f64(&lookup, "RELIEF_FIT_EROSION_RATE") {
            config.erosion_rate = val;
        }

        if let Some(val) = parse_f64(&lookup, "RELIEF_FIT_ROCK_DENSITY") {
            config.rock_density = val;
        }

        if let Some(val) = parse_f64(&lookup, "RELIEF_FIT_SOIL_DENSITY") {
            config.soil_density = val;
        }

        config
    }

    /// Validate the constants.
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("diffusivity", self.diffusivity),
            ("erosion_rate", self.erosion_rate),
            ("rock_density", self.rock_density),
            ("soil_density", self.soil_density),
        ];
        for (name, value) in fields {
            if !(value.is_finite() && value > 0.0) {
                return Err(format!("{} must be finite and > 0, got {}", name, value));
            }
        }
        Ok(())
    }
}

/// Bounds a hilltop record must satisfy to enter the fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleFilter {
    /// Relief must exceed this (m). Smaller values are processing artifacts.
    pub relief_min: f64,

    /// Hillslope length must exceed this (m).
    pub length_min: f64,

    /// Hilltop slope must be below this.
    pub slope_max: f64,

    /// Open interval for `euclidean_distance / length`.
    pub euclidean_ratio_band: (f64, f64),
}

impl Default for SampleFilter {
    fn default() -> Self {
        Self {
            relief_min: 2.0,
            length_min: 2.0,
            slope_max: 1.2,
            euclidean_ratio_band: (0.9999, 1.0001),
        }
    }
}

impl SampleFilter {
    /// Load filter bounds from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(env_var)
    }

    /// Load filter bounds from `lookup`, keyed by environment variable name.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(val) = parse_f64(&lookup, "RELIEF_FIT_RELIEF_MIN") {
            config.relief_min = val;
        }

        if let Some(val) = parse_f64(&lookup, "RELIEF_FIT_LENGTH_MIN") {
            config.length_min = val;
        }

        if let Some(val) = parse_f64(&lookup, "RELIEF_FIT_SLOPE_MAX") {
            config.slope_max = val;
        }

        config
    }

    /// Validate the filter.
    pub fn validate(&self) -> Result<(), String> {
        let (low, high) = self.euclidean_ratio_band;
        if !(low < high) {
            return Err(format!(
                "euclidean_ratio_band must be increasing, got ({}, {})",
                low, high
            ));
        }
        if self.length_min < 0.0 {
            return Err("length_min must be >= 0".to_string());
        }
        Ok(())
    }
}

/// Settings for the Levenberg-Marquardt solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Accepted and rejected steps allowed before giving up.
    pub max_iterations: usize,

    /// Relative cost reduction treated as converged.
    pub ftol: f64,

    /// Relative parameter step treated as converged.
    pub xtol: f64,

    /// Starting damping factor.
    pub initial_damping: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 400,
            ftol: 1.49012e-8,
            xtol: 1.49012e-8,
            initial_damping: 1e-3,
        }
    }
}

impl SolverConfig {
    /// Load solver settings from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(env_var)
    }

    /// Load solver settings from `lookup`, keyed by environment variable name.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(val) = lookup("RELIEF_FIT_MAX_ITERATIONS") {
            if let Ok(iterations) = val.trim().parse() {
                config.max_iterations = iterations;
            }
        }

        config
    }

    /// Validate the solver settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_iterations == 0 {
            return Err("max_iterations must be > 0".to_string());
        }
        if !(self.ftol >= 0.0 && self.xtol >= 0.0) {
            return Err("ftol and xtol must be >= 0".to_string());
        }
        if !(self.initial_damping.is_finite() && self.initial_damping > 0.0) {
            return Err("initial_damping must be finite and > 0".to_string());
        }
        Ok(())
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn parse_f64(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<f64> {
    lookup(name).and_then(|val| val.trim().parse().ok())
}
