//! # GBMKit Core
//!
//! Core types, errors, and events for GBMKit.
//! Provides the data model shared by the simulation engine, the settings
//! layer and whatever front end consumes the drawn sample paths.

pub mod data;
pub mod error;
pub mod event_bus;
pub mod types;

pub use data::{
    format_canvas_points, CanvasPoint, Palette, Range, SamplePath, SimulationParameters, Stroke,
    WorldPoint,
};

pub use error::{ComputationError, Error, ParameterError, Result};

pub use event_bus::{
    EventBus, EventBusConfig, EventCategory, EventFilter, RunOutcome, RunStatus,
    SimulationEvent, SubscriptionId,
};

pub use types::{thread_safe, thread_safe_rw, ThreadSafe, ThreadSafeRw, ThreadSafeVec};
