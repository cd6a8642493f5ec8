//! Simulation run orchestration.
//!
//! A run generates paths one at a time, widens the value axis when a path
//! escapes it, projects the path, and appends it to the shared output
//! sequence. Generation and projection run on tokio's blocking pool; the
//! run's own control flow stays sequential.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use gbmkit_core::{
    thread_safe, thread_safe_rw, CanvasPoint, Error, EventBus, Palette, Range,
    Result, RunOutcome, RunStatus, SamplePath, SimulationEvent, SimulationParameters, ThreadSafe,
    ThreadSafeRw, ThreadSafeVec, WorldPoint,
};

use crate::axis::AxisRangeTracker;
use crate::cancel::{CancelScope, RunScopes};
use crate::generator::PathGenerator;
use crate::mapper::{project_path, CanvasSize};
use crate::rescale::{RescaleCoordinator, RescaleJob};

/// Cloneable handle that stops whatever run is active on its runner.
#[derive(Debug, Clone)]
pub struct StopHandle {
    scopes: ThreadSafe<RunScopes>,
}

impl StopHandle {
    /// Cancel both the drawing and the rescale scope.
    pub fn stop(&self) {
        self.scopes.lock().cancel_all();
    }
}

/// Drives one simulation at a time over a fixed parameter set.
pub struct SimulationRunner {
    params: SimulationParameters,
    palette: Palette,
    seed: Option<u64>,
    status: ThreadSafeRw<RunStatus>,
    paths: ThreadSafeVec<SamplePath>,
    range_x: ThreadSafeRw<Range>,
    range_y: ThreadSafeRw<Range>,
    scopes: ThreadSafe<RunScopes>,
    events: Arc<EventBus>,
}

impl SimulationRunner {
    /// Create a runner using the default palette and OS entropy.
    pub fn new(params: SimulationParameters) -> Self {
        Self::with_palette(params, Palette::default())
    }

    pub fn with_palette(params: SimulationParameters, palette: Palette) -> Self {
        let range_x = params.x_range();
        Self {
            params,
            palette,
            seed: None,
            status: thread_safe_rw(RunStatus::Idle),
            paths: thread_safe_rw(Vec::new()),
            range_x: thread_safe_rw(range_x),
            range_y: thread_safe_rw(Range::default()),
            scopes: thread_safe(RunScopes::new()),
            events: Arc::new(EventBus::new()),
        }
    }

    /// Seed every run of this runner, making its paths reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replace the event bus, e.g. one with history enabled.
    pub fn with_event_bus(mut self, events: Arc<EventBus>) -> Self {
        self.events = events;
        self
    }

    pub fn parameters(&self) -> &SimulationParameters {
        &self.params
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn events(&self) -> &Arc<EventBus> {
        &self.events
    }

    pub fn status(&self) -> RunStatus {
        *self.status.read()
    }

    pub fn range_x(&self) -> Range {
        *self.range_x.read()
    }

    pub fn range_y(&self) -> Range {
        *self.range_y.read()
    }

    /// Shared output sequence, for drawing surfaces that render in place.
    pub fn shared_paths(&self) -> ThreadSafeVec<SamplePath> {
        self.paths.clone()
    }

    /// Snapshot of the output sequence
    pub fn paths(&self) -> Vec<SamplePath> {
        self.paths.read().clone()
    }

    pub fn path_count(&self) -> usize {
        self.paths.read().len()
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            scopes: self.scopes.clone(),
        }
    }

    /// Request cancellation of the active run. Harmless when idle or finished.
    pub fn stop(&self) {
        self.scopes.lock().cancel_all();
        debug!("Stop requested");
    }

    /// Run the simulation to completion or cancellation.
    ///
    /// Parameter errors are returned before any state is touched. A stop
    /// request is not an error: the outcome reports `Cancelled` and the paths
    /// appended so far remain. Computation errors end the run in `Failed`.
    pub async fn start(&self, canvas_width: f64, canvas_height: f64) -> Result<RunOutcome> {
        let canvas = CanvasSize::new(canvas_width, canvas_height)?;
        let generator = PathGenerator::new(&self.params)?;

        let drawing = {
            let mut status = self.status.write();
            if *status == RunStatus::Running {
                return Err(Error::AlreadyRunning);
            }
            *status = RunStatus::Running;
            // Fresh scopes before anyone can observe Running, so a stop()
            // issued from here on reaches this run.
            let mut scopes = self.scopes.lock();
            *scopes = RunScopes::new();
            scopes.drawing.clone()
        };

        let result = self.run(generator, canvas, drawing).await;

        let status = match &result {
            Ok(status) => *status,
            Err(_) => RunStatus::Failed,
        };
        *self.status.write() = status;

        let paths_drawn = self.path_count();
        self.events.publish(SimulationEvent::RunFinished {
            status,
            paths: paths_drawn,
        });
        info!("Run {} with {} paths", status, paths_drawn);

        result.map(|status| RunOutcome {
            status,
            paths_drawn,
        })
    }

    async fn run(
        &self,
        generator: PathGenerator,
        canvas: CanvasSize,
        drawing: CancelScope,
    ) -> Result<RunStatus> {
        let planned = self.params.number_of_paths;
        let range_x = self.params.x_range();

        self.paths.write().clear();
        *self.range_x.write() = range_x;
        *self.range_y.write() = Range::default();

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut tracker = AxisRangeTracker::default();
        let mut rescaler =
            RescaleCoordinator::new(self.paths.clone(), self.scopes.clone(), self.events.clone());

        self.events.publish(SimulationEvent::RunStarted { planned });
        info!(
            "Starting run: {} paths x {} samples on {}x{} canvas",
            planned, self.params.number_of_samples, canvas.width, canvas.height
        );

        for i in 0..planned {
            let task_scope = drawing.clone();
            let (returned_rng, generated) = tokio::task::spawn_blocking(move || {
                let points = generator.generate(&mut rng, &task_scope);
                (rng, points)
            })
            .await
            .map_err(|e| Error::Task(e.to_string()))?;
            rng = returned_rng;

            let world_points = match generated {
                Ok(points) => points,
                Err(e) if e.is_cancelled() => {
                    debug!("Drawing cancelled in iteration {}: {}", i, e);
                    rescaler.supersede().await;
                    return Ok(RunStatus::Cancelled);
                }
                Err(e) => {
                    warn!("Generating sample path {} failed: {}", i, e);
                    rescaler.supersede().await;
                    return Err(e);
                }
            };

            if let Some(widened) = tracker.observe(world_points.iter().map(|p| p.value)) {
                *self.range_y.write() = widened;
                self.events
                    .publish(SimulationEvent::RangeWidened { range: widened });
                debug!("Value range widened to {} by path {}", widened, i);
                rescaler
                    .rescale(RescaleJob {
                        upto: i,
                        canvas,
                        range_x,
                        range_y: widened,
                    })
                    .await;
            }

            let range_y = tracker.range();
            let task_scope = drawing.clone();
            let (world_points, projected) = tokio::task::spawn_blocking(move || {
                let canvas_points =
                    project_path(&world_points, canvas, &range_x, &range_y, &task_scope);
                (world_points, canvas_points)
            })
            .await
            .map_err(|e| Error::Task(e.to_string()))?;

            let canvas_points = match projected {
                Ok(points) => points,
                Err(e) if e.is_cancelled() => {
                    debug!("Drawing cancelled in iteration {}: {}", i, e);
                    rescaler.supersede().await;
                    return Ok(RunStatus::Cancelled);
                }
                Err(e) => {
                    warn!("Projecting sample path {} failed: {}", i, e);
                    rescaler.supersede().await;
                    return Err(e);
                }
            };

            self.append(world_points, canvas_points, i);
        }

        if let Some(report) = rescaler.finish().await {
            debug!(
                "Final rescale pass rewrote {} of {} paths",
                report.rescaled, report.requested
            );
        }

        Ok(RunStatus::Completed)
    }

    fn append(
        &self,
        world_points: Vec<WorldPoint>,
        canvas_points: Vec<CanvasPoint>,
        index: usize,
    ) {
        let stroke = self.palette.stroke_for(index);
        self.paths
            .write()
            .push(SamplePath::new(world_points, canvas_points, stroke));
        debug!("Drawn sample path {}", index);
        self.events.publish(SimulationEvent::PathAppended { index });
    }
}

impl std::fmt::Debug for SimulationRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulationRunner")
            .field("params", &self.params)
            .field("status", &self.status())
            .field("paths", &self.path_count())
            .finish()
    }
}
