//! # Event Bus Module
//!
//! Decoupled notification from the simulation engine to whatever draws its
//! output. Each runner owns one bus; there is no process-wide instance.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gbmkit_core::event_bus::{EventBus, EventCategory, EventFilter, SimulationEvent};
//!
//! let bus = EventBus::new();
//! let subscription = bus.subscribe(
//!     EventFilter::Categories(vec![EventCategory::Rescale]),
//!     |event| println!("{}", event.description()),
//! );
//!
//! bus.publish(SimulationEvent::PathRescaled { index: 3 });
//! bus.unsubscribe(subscription);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
