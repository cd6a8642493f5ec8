//! Configuration and settings management for GBMKit
//!
//! Provides configuration file handling, defaults, and validation.
//! Supports JSON and TOML file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Simulation settings (path count, sample count, GBM parameters)
//! - Canvas settings (drawing surface size)
//! - Run settings (seed, palette)

use gbmkit_core::{Palette, ParameterError, SimulationParameters};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{ConfigError, SettingsError, SettingsResult};

/// File name of the configuration inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Number of paths drawn per run
    pub number_of_paths: usize,
    /// Samples per path, including the starting point
    pub number_of_samples: usize,
    /// Starting value S0
    pub initial_value: f64,
    /// Drift
    pub mu: f64,
    /// Volatility
    pub sigma: f64,
    /// Time horizon T
    pub horizon: f64,
}

impl Default for SimulationSettings {
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

impl From<&SimulationSettings> for SimulationParameters {
    fn from(settings: &SimulationSettings) -> Self {
        Self {
            number_of_paths: settings.number_of_paths,
            number_of_samples: settings.number_of_samples,
            initial_value: settings.initial_value,
            mu: settings.mu,
            sigma: settings.sigma,
            horizon: settings.horizon,
        }
    }
}

/// Drawing surface settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    /// Canvas width in pixels
    pub width: f64,
    /// Canvas height in pixels
    pub height: f64,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Per-run settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSettings {
    /// Fixed seed; OS entropy when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Colour names cycled by path index; all named colours when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub palette: Option<Vec<String>>,
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Simulation settings
    pub simulation: SimulationSettings,
    /// Canvas settings
    pub canvas: CanvasSettings,
    /// Run settings
    pub run: RunSettings,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into()),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content).map_err(|e| {
            SettingsError::SaveError(format!("{}: {}", path.display(), e))
        })?;

        debug!("Saved configuration to {}", path.display());
        Ok(())
    }

    /// Load from `path` if given, else from the default location if a file
    /// exists there, else built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }

        match default_config_path() {
            Ok(default) if default.is_file() => Self::load_from_file(&default),
            _ => {
                debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        self.parameters().validate()?;

        let canvas_ok = |v: f64| v.is_finite() && v > 0.0;
        if !canvas_ok(self.canvas.width) {
            return Err(ConfigError::ValueOutOfRange {
                key: "canvas.width".to_string(),
                value: self.canvas.width.to_string(),
            }
            .into());
        }
        if !canvas_ok(self.canvas.height) {
            return Err(ConfigError::ValueOutOfRange {
                key: "canvas.height".to_string(),
                value: self.canvas.height.to_string(),
            }
            .into());
        }

        self.palette()?;
        Ok(())
    }

    /// Simulation parameters described by this config
    pub fn parameters(&self) -> SimulationParameters {
        SimulationParameters::from(&self.simulation)
    }

    /// Palette described by this config
    pub fn palette(&self) -> SettingsResult<Palette> {
        match &self.run.palette {
            None => Ok(Palette::default()),
            Some(names) if names.is_empty() => Err(SettingsError::InvalidSetting {
                key: "run.palette".to_string(),
                reason: "must name at least one colour".to_string(),
            }),
            Some(names) => Palette::from_names(names.as_slice()).map_err(|e| match e {
                ParameterError::UnknownColor(name) => ConfigError::UnknownColor(name).into(),
                other => other.into(),
            }),
        }
    }
}

/// Default configuration file, e.g. `~/.config/gbmkit/config.toml`
pub fn default_config_path() -> SettingsResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("gbmkit").join(CONFIG_FILE_NAME))
        .ok_or_else(|| {
            ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string()).into()
        })
}
