//! Error handling for GBMKit
//!
//! Provides error types for every stage of a simulation run:
//! - Parameter errors (rejected before any work begins)
//! - Computation errors (degenerate ranges, non-finite values)
//! - Cancellation (cooperative, expected outcome of a stop request)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Parameter error type
///
/// Raised when simulation inputs violate their preconditions. A run that
/// fails with one of these never starts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// Too few samples per path
    #[error("Sample count must be at least 2, got {count}")]
    TooFewSamples {
        /// The requested sample count.
        count: usize,
    },

    /// A numeric parameter is negative where it must not be
    #[error("Parameter '{name}' must be non-negative, got {value}")]
    Negative {
        /// The parameter name.
        name: &'static str,
        /// The offending value.
        value: f64,
    },

    /// A numeric parameter is NaN or infinite
    #[error("Parameter '{name}' must be finite, got {value}")]
    NotFinite {
        /// The parameter name.
        name: &'static str,
        /// The offending value.
        value: f64,
    },

    /// The time horizon is zero, leaving the time axis without extent
    #[error("Horizon must be greater than zero")]
    ZeroHorizon,

    /// Canvas dimensions must be strictly positive
    #[error("Invalid canvas size {width}x{height}")]
    InvalidCanvas {
        /// The requested width in pixels.
        width: f64,
        /// The requested height in pixels.
        height: f64,
    },

    /// The stroke palette has no entries
    #[error("Palette must contain at least one stroke")]
    EmptyPalette,

    /// A palette entry does not name a known colour
    #[error("Unknown colour '{0}'")]
    UnknownColor(String),
}

/// Computation error type
///
/// Represents numeric failures detected while generating or projecting
/// a path. These are never silently propagated into drawn output.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComputationError {
    /// An axis range has zero extent so projection would divide by zero
    #[error("Degenerate {axis} range [{min}, {max}]")]
    DegenerateRange {
        /// The axis name ("x" or "y").
        axis: &'static str,
        /// The range minimum.
        min: f64,
        /// The range maximum.
        max: f64,
    },

    /// The exponential step overflowed or produced NaN
    #[error("Non-finite value {value} at sample {sample}")]
    NonFiniteSample {
        /// Index of the sample that went non-finite.
        sample: usize,
        /// The offending value.
        value: f64,
    },

    /// Projection produced a non-finite canvas coordinate
    #[error("Non-finite canvas point ({x}, {y})")]
    NonFiniteProjection {
        /// Projected x coordinate.
        x: f64,
        /// Projected y coordinate.
        y: f64,
    },
}

/// Main error type for GBMKit
///
/// A unified error type that can represent any error raised by the engine.
#[derive(Error, Debug)]
pub enum Error {
    /// Parameter error
    #[error(transparent)]
    Parameters(#[from] ParameterError),

    /// Computation error
    #[error(transparent)]
    Computation(#[from] ComputationError),

    /// Work stopped at a cancellation checkpoint
    #[error("Cancelled after {completed} of {total} steps")]
    Cancelled {
        /// Steps finished before the checkpoint fired.
        completed: usize,
        /// Steps that were planned.
        total: usize,
    },

    /// `start` was called while a run is in progress
    #[error("A simulation run is already in progress")]
    AlreadyRunning,

    /// A background task panicked or was aborted
    #[error("Background task failed: {0}")]
    Task(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a cancellation rather than a failure
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled { .. })
    }

    /// Check if this is a computation error
    pub fn is_computation_error(&self) -> bool {
        matches!(self, Error::Computation(_))
    }

    /// Check if this is a parameter error
    pub fn is_parameter_error(&self) -> bool {
        matches!(self, Error::Parameters(_))
    }

    /// Check if a start was refused because a run is in progress
    pub fn is_already_running(&self) -> bool {
        matches!(self, Error::AlreadyRunning)
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
