//! Geometric Brownian motion path generation.
//!
//! Uses the exact log-normal update
//!
//! ```text
//! S_i = S_{i-1} * exp((mu - sigma^2 / 2) * dt + sigma * sqrt(dt) * Z)
//! ```
//!
//! with `Z ~ N(0, 1)` and `dt = T / (n - 1)`, so the last sample falls exactly
//! on the horizon.

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use gbmkit_core::{ComputationError, ParameterError, Result, SimulationParameters, WorldPoint};

use crate::cancel::CancelScope;

/// Generates one path per call from a caller-owned random source.
#[derive(Debug, Clone, Copy)]
pub struct PathGenerator {
    samples: usize,
    initial_value: f64,
    mu: f64,
    sigma: f64,
    dt: f64,
}

impl PathGenerator {
    /// Build a generator, rejecting parameters it cannot honour.
    pub fn new(params: &SimulationParameters) -> std::result::Result<Self, ParameterError> {
        params.validate()?;
        Ok(Self {
            samples: params.number_of_samples,
            initial_value: params.initial_value,
            mu: params.mu,
            sigma: params.sigma,
            dt: params.time_step(),
        })
    }

    /// Spacing between samples
    pub fn time_step(&self) -> f64 {
        self.dt
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Produce exactly `samples` points starting at `(0, S0)`.
    ///
    /// Draws advance `rng`, so successive calls consume disjoint parts of
    /// the same stream. `cancel` is checked before every draw; on
    /// cancellation no partial path is returned.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        cancel: &CancelScope,
    ) -> Result<Vec<WorldPoint>> {
        if self.sigma == 0.0 {
            return self.generate_deterministic(cancel);
        }

        let drift = (self.mu - self.sigma * self.sigma / 2.0) * self.dt;
        let diffusion = self.sigma * self.dt.sqrt();

        let mut points = Vec::with_capacity(self.samples);
        let mut value = self.initial_value;
        points.push(WorldPoint::new(0.0, value));

        for i in 1..self.samples {
            cancel.checkpoint(i, self.samples)?;

            let z: f64 = StandardNormal.sample(rng);
            value *= (drift + diffusion * z).exp();
            if !value.is_finite() {
                return Err(ComputationError::NonFiniteSample { sample: i, value }.into());
            }

            points.push(WorldPoint::new(i as f64 * self.dt, value));
        }

        Ok(points)
    }

    /// Zero volatility: `S_i = S0 * exp(mu * dt * i)`, no draws taken.
    fn generate_deterministic(&self, cancel: &CancelScope) -> Result<Vec<WorldPoint>> {
        let mut points = Vec::with_capacity(self.samples);
        points.push(WorldPoint::new(0.0, self.initial_value));

        for i in 1..self.samples {
            cancel.checkpoint(i, self.samples)?;

            let t = i as f64 * self.dt;
            let value = self.initial_value * (self.mu * t).exp();
            if !value.is_finite() {
                return Err(ComputationError::NonFiniteSample { sample: i, value }.into());
            }
            points.push(WorldPoint::new(t, value));
        }

        Ok(points)
    }
}
