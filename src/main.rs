use std::path::PathBuf;

use gbmkit::{init_logging, runner_from_config, Config, EventCategory, EventFilter, RunStatus};
use tracing::{debug, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;
    info!("GBMKit {}", gbmkit::VERSION);

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = Config::load_or_default(config_path.as_deref())?;
    let runner = runner_from_config(&config)?;

    runner.events().subscribe(
        EventFilter::Categories(vec![EventCategory::Rescale]),
        |event| debug!("{}", event.description()),
    );

    let stop = runner.stop_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, stopping run");
            stop.stop();
        }
    });

    let outcome = runner
        .start(config.canvas.width, config.canvas.height)
        .await?;

    let range = runner.range_y();
    info!(
        "{} paths drawn, value axis {} ({})",
        outcome.paths_drawn, range, outcome.status
    );
    if outcome.status == RunStatus::Completed {
        if let Some(last) = runner.paths().last() {
            let terminal = last.values().last().unwrap_or_default();
            info!("Last path ends at {:.4} in {}", terminal, last.stroke());
        }
    }

    Ok(())
}
