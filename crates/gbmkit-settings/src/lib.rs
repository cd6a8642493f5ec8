//! GBMKit Settings Crate
//!
//! Handles simulation configuration files, defaults, and validation.

pub mod config;
pub mod error;

pub use config::{default_config_path, CanvasSettings, Config, RunSettings, SimulationSettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
