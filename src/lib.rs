//! # GBMKit
//!
//! Progressive simulation of geometric Brownian motion sample paths, drawn
//! one at a time into a pixel canvas whose value axis widens as paths
//! escape it.
//!
//! ## Architecture
//!
//! GBMKit is organized as a workspace with multiple crates:
//!
//! 1. **gbmkit-core** - Data model, errors, events, shared-state aliases
//! 2. **gbmkit-engine** - Path generation, projection, rescaling, run lifecycle
//! 3. **gbmkit-settings** - Configuration files and defaults
//! 4. **gbmkit** - Headless driver that integrates all crates

pub use gbmkit_core::{
    format_canvas_points, CanvasPoint, ComputationError, Error, EventBus, EventBusConfig,
    EventCategory, EventFilter, Palette, ParameterError, Range, Result, RunOutcome, RunStatus,
    SamplePath, SimulationEvent, SimulationParameters, Stroke, WorldPoint,
};
pub use gbmkit_engine::{CanvasSize, SimulationRunner, StopHandle};
pub use gbmkit_settings::{Config, SettingsError, SettingsResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build a runner from a validated configuration.
pub fn runner_from_config(config: &Config) -> SettingsResult<SimulationRunner> {
    config.validate()?;

    let runner = SimulationRunner::with_palette(config.parameters(), config.palette()?);
    Ok(match config.run.seed {
        Some(seed) => runner.with_seed(seed),
        None => runner,
    })
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.to_string()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
