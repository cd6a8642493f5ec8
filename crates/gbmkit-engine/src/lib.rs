//! # GBMKit Engine
//!
//! Simulates geometric Brownian motion paths and projects them into a pixel
//! canvas for progressive display.
//!
//! - [`generator`]: one path per call from a caller-owned random source
//! - [`mapper`]: world to canvas coordinate mapping
//! - [`axis`]: value-axis widening
//! - [`rescale`]: background re-projection of earlier paths
//! - [`runner`]: the full start/stop lifecycle

pub mod axis;
pub mod cancel;
pub mod generator;
pub mod mapper;
pub mod rescale;
pub mod runner;

pub use axis::{widen, AxisRangeTracker, PADDING_FRACTION};
pub use cancel::{CancelScope, RunScopes};
pub use generator::PathGenerator;
pub use mapper::{project, project_path, unproject, CanvasSize};
pub use rescale::{PassStatus, RescaleCoordinator, RescaleJob, RescaleReport};
pub use runner::{SimulationRunner, StopHandle};
