//! Immutable inputs of one simulation run.

use serde::{Deserialize, Serialize};

use super::Range;
use crate::error::ParameterError;

/// Parameters of a geometric Brownian motion run.
///
/// The caller is expected to validate text input before building this;
/// [`SimulationParameters::validate`] re-checks the numeric preconditions so
/// the engine never starts on inputs it cannot honour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Number of paths to draw
    pub number_of_paths: usize,
    /// Samples per path, including the initial point
    pub number_of_samples: usize,
    /// Value at time zero
    pub initial_value: f64,
    /// Drift (mu)
    pub mu: f64,
    /// Volatility (sigma)
    pub sigma: f64,
    /// Time horizon (T)
    pub horizon: f64,
}

impl SimulationParameters {
    /// Check every precondition, reporting the first violation.
    pub fn validate(&self) -> Result<(), ParameterError> {
        if self.number_of_samples < 2 {
            return Err(ParameterError::TooFewSamples {
                count: self.number_of_samples,
            });
        }

        for (name, value) in [
            ("initial_value", self.initial_value),
            ("mu", self.mu),
            ("sigma", self.sigma),
            ("horizon", self.horizon),
        ] {
            if !value.is_finite() {
                return Err(ParameterError::NotFinite { name, value });
            }
        }

        for (name, value) in [
            ("initial_value", self.initial_value),
            ("sigma", self.sigma),
            ("horizon", self.horizon),
        ] {
            if value < 0.0 {
                return Err(ParameterError::Negative { name, value });
            }
        }

        // A zero horizon collapses the time axis to a point.
        if self.horizon == 0.0 {
            return Err(ParameterError::ZeroHorizon);
        }

        Ok(())
    }

    /// Spacing between consecutive samples: `T / (n - 1)`
    pub fn time_step(&self) -> f64 {
        self.horizon / (self.number_of_samples.saturating_sub(1).max(1)) as f64
    }

    /// Time axis range for the run, `[0, T]`
    pub fn x_range(&self) -> Range {
        Range::new(0.0, self.horizon)
    }
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            number_of_paths: 100,
            number_of_samples: 1000,
            initial_value: 1.0,
            mu: 0.05,
            sigma: 0.2,
            horizon: 1.0,
        }
    }
}
