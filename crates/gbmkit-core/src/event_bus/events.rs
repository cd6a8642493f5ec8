//! Event type definitions for the event bus.
//!
//! Events are emitted by the simulation runner and its rescale passes so a
//! drawing surface can refresh without polling.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::data::Range;

/// Lifecycle state of a simulation runner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RunStatus {
    /// No run has been started yet.
    #[default]
    Idle,
    /// Paths are being generated.
    Running,
    /// Every planned path was appended.
    Completed,
    /// A stop request truncated the run.
    Cancelled,
    /// A computation error aborted the run.
    Failed,
}

impl RunStatus {
    /// True once the run has reached a terminal state
    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            RunStatus::Completed | RunStatus::Cancelled | RunStatus::Failed
        )
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Idle => write!(f, "Idle"),
            RunStatus::Running => write!(f, "Running"),
            RunStatus::Completed => write!(f, "Completed"),
            RunStatus::Cancelled => write!(f, "Cancelled"),
            RunStatus::Failed => write!(f, "Failed"),
        }
    }
}

/// Summary returned when a run ends without error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutcome {
    /// Terminal status (Completed or Cancelled).
    pub status: RunStatus,
    /// Number of paths in the output sequence.
    pub paths_drawn: usize,
}

/// Events published during a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimulationEvent {
    /// A run started and the output sequence was cleared.
    RunStarted {
        /// Number of paths planned.
        planned: usize,
    },
    /// The value axis widened.
    RangeWidened {
        /// The new padded range.
        range: Range,
    },
    /// A freshly generated path was appended.
    PathAppended {
        /// Position in the output sequence.
        index: usize,
    },
    /// An earlier path was re-projected against a wider range.
    PathRescaled {
        /// Position in the output sequence.
        index: usize,
    },
    /// A rescale pass stopped before finishing.
    RescaleCancelled {
        /// First index the pass did not reach.
        at: usize,
    },
    /// A rescale pass hit a computation error.
    RescaleFailed {
        /// Index of the path that failed.
        index: usize,
        /// Error description.
        reason: String,
    },
    /// The run reached a terminal state.
    RunFinished {
        /// Terminal status.
        status: RunStatus,
        /// Number of paths in the output sequence.
        paths: usize,
    },
}

impl SimulationEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            SimulationEvent::RunStarted { .. } | SimulationEvent::RunFinished { .. } => {
                EventCategory::Run
            }
            SimulationEvent::RangeWidened { .. } | SimulationEvent::PathAppended { .. } => {
                EventCategory::Drawing
            }
            SimulationEvent::PathRescaled { .. }
            | SimulationEvent::RescaleCancelled { .. }
            | SimulationEvent::RescaleFailed { .. } => EventCategory::Rescale,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            SimulationEvent::RunStarted { planned } => format!("Run started ({} paths)", planned),
            SimulationEvent::RangeWidened { range } => format!("Range widened to {}", range),
            SimulationEvent::PathAppended { index } => format!("Path {} drawn", index),
            SimulationEvent::PathRescaled { index } => format!("Path {} rescaled", index),
            SimulationEvent::RescaleCancelled { at } => format!("Rescale cancelled at {}", at),
            SimulationEvent::RescaleFailed { index, reason } => {
                format!("Rescale of path {} failed: {}", index, reason)
            }
            SimulationEvent::RunFinished { status, paths } => {
                format!("Run {} with {} paths", status, paths)
            }
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Run lifecycle events.
    Run,
    /// Main-line drawing events.
    Drawing,
    /// Rescale pass events.
    Rescale,
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventCategory::Run => write!(f, "Run"),
            EventCategory::Drawing => write!(f, "Drawing"),
            EventCategory::Rescale => write!(f, "Rescale"),
        }
    }
}
