//! Data models for GBMKit
//!
//! Provides the value types exchanged between the engine and its consumers:
//! axis ranges, world and canvas points, sample paths, strokes and the
//! immutable parameters of a run.

mod palette;
mod params;
mod path;

pub use palette::{Palette, Stroke};
pub use params::SimulationParameters;
pub use path::SamplePath;

use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

/// Closed interval on one axis.
///
/// `min <= max` is expected but not enforced; projection checks for a
/// zero-width range before dividing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    /// Lower bound
    pub min: f64,
    /// Upper bound
    pub max: f64,
}

impl Range {
    /// Create a new range
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Width of the range (`max - min`)
    pub fn extent(&self) -> f64 {
        self.max - self.min
    }

    /// True when projecting against this range would divide by zero
    pub fn is_degenerate(&self) -> bool {
        self.max == self.min || !self.extent().is_finite()
    }

    /// Check whether a value lies inside the closed interval
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl Default for Range {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// A sample in simulation units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    /// Time coordinate
    pub time: f64,
    /// Process value
    pub value: f64,
}

impl WorldPoint {
    /// Create a new world point
    pub fn new(time: f64, value: f64) -> Self {
        Self { time, value }
    }
}

/// A sample in pixel units, origin top-left, y growing downward
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CanvasPoint {
    /// Horizontal pixel coordinate
    pub x: f64,
    /// Vertical pixel coordinate
    pub y: f64,
}

impl CanvasPoint {
    /// Create a new canvas point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for CanvasPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Serialise canvas points as `"x,y"` pairs separated by single spaces.
///
/// Uses Rust's shortest round-trip float formatting, which is locale
/// independent.
pub fn format_canvas_points(points: &[CanvasPoint]) -> String {
    let mut out = String::with_capacity(points.len() * 16);
    for (i, point) in points.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{}", point);
    }
    out
}
