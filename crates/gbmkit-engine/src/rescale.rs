//! Background re-projection of already drawn paths.
//!
//! When the value axis widens, every path drawn before the one that caused
//! the widening must be projected again. That work runs as a tokio task so
//! the run keeps generating new paths in the meantime.
//!
//! At most one pass exists at a time. Starting a new pass cancels the
//! previous one and waits for it to return before the new scope is
//! installed, so an old pass can never write a stale projection after a
//! newer range is in effect.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use gbmkit_core::{
    Error, EventBus, Range, SamplePath, SimulationEvent, ThreadSafe, ThreadSafeVec,
};

use crate::cancel::{CancelScope, RunScopes};
use crate::mapper::{project_path, CanvasSize};

/// Inputs of one rescale pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RescaleJob {
    /// Paths `0..upto` are re-projected.
    pub upto: usize,
    pub canvas: CanvasSize,
    pub range_x: Range,
    pub range_y: Range,
}

/// How a pass ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassStatus {
    /// Every assigned path was re-projected.
    Finished,
    /// The pass stopped at a checkpoint.
    Cancelled,
    /// A projection failed; remaining paths keep their old coordinates.
    Failed,
}

/// Summary of a finished pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RescaleReport {
    /// Number of paths the pass was asked to cover.
    pub requested: usize,
    /// Paths actually rewritten, always a prefix of `0..requested`.
    pub rescaled: usize,
    pub status: PassStatus,
}

struct ActivePass {
    scope: CancelScope,
    handle: JoinHandle<RescaleReport>,
}

/// Owns the single in-flight rescale pass of a run.
pub struct RescaleCoordinator {
    paths: ThreadSafeVec<SamplePath>,
    scopes: ThreadSafe<RunScopes>,
    events: Arc<EventBus>,
    active: Option<ActivePass>,
}

impl RescaleCoordinator {
    pub fn new(
        paths: ThreadSafeVec<SamplePath>,
        scopes: ThreadSafe<RunScopes>,
        events: Arc<EventBus>,
    ) -> Self {
        Self {
            paths,
            scopes,
            events,
            active: None,
        }
    }

    /// True while a pass is still running
    pub fn is_active(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|pass| !pass.handle.is_finished())
    }

    /// Cancel the active pass, if any, and wait for it to return.
    pub async fn supersede(&mut self) -> Option<RescaleReport> {
        let pass = self.active.take()?;
        pass.scope.cancel();
        Some(Self::join(pass.handle).await)
    }

    /// Wait for the active pass to run to completion without cancelling it.
    pub async fn finish(&mut self) -> Option<RescaleReport> {
        let pass = self.active.take()?;
        Some(Self::join(pass.handle).await)
    }

    /// Replace any running pass with a new one over `0..job.upto`.
    ///
    /// Returns `false` when nothing was spawned, either because there is
    /// nothing to rescale or because the run has already been stopped.
    pub async fn rescale(&mut self, job: RescaleJob) -> bool {
        if let Some(report) = self.supersede().await {
            debug!(
                "Superseded rescale pass after {} of {} paths",
                report.rescaled, report.requested
            );
        }

        let scope = {
            let mut scopes = self.scopes.lock();
            // stop() holds the same lock while cancelling, so a stop either
            // lands here or cancels the scope installed below.
            if scopes.is_stopped() {
                return false;
            }
            let fresh = CancelScope::new();
            scopes.rescale = fresh.clone();
            fresh
        };

        if job.upto == 0 {
            return false;
        }

        debug!("Rescaling {} paths to {}", job.upto, job.range_y);
        let handle = tokio::spawn(run_pass(
            self.paths.clone(),
            self.events.clone(),
            scope.clone(),
            job,
        ));
        self.active = Some(ActivePass { scope, handle });
        true
    }

    async fn join(handle: JoinHandle<RescaleReport>) -> RescaleReport {
        match handle.await {
            Ok(report) => report,
            Err(e) => {
                warn!("Rescale task did not complete: {}", e);
                RescaleReport {
                    requested: 0,
                    rescaled: 0,
                    status: PassStatus::Failed,
                }
            }
        }
    }
}

impl Drop for RescaleCoordinator {
    fn drop(&mut self) {
        if let Some(pass) = self.active.take() {
            pass.scope.cancel();
        }
    }
}

async fn run_pass(
    paths: ThreadSafeVec<SamplePath>,
    events: Arc<EventBus>,
    scope: CancelScope,
    job: RescaleJob,
) -> RescaleReport {
    let report = |rescaled, status| RescaleReport {
        requested: job.upto,
        rescaled,
        status,
    };

    for index in 0..job.upto {
        if scope.is_cancelled() {
            debug!("Rescaling cancelled in iteration {}", index);
            events.publish(SimulationEvent::RescaleCancelled { at: index });
            return report(index, PassStatus::Cancelled);
        }

        let task_paths = paths.clone();
        let task_scope = scope.clone();
        let projected = tokio::task::spawn_blocking(move || {
            let guard = task_paths.read();
            match guard.get(index) {
                Some(path) => project_path(
                    path.world_points(),
                    job.canvas,
                    &job.range_x,
                    &job.range_y,
                    &task_scope,
                ),
                None => Err(Error::other(format!("No sample path at index {}", index))),
            }
        })
        .await
        .map_err(|e| Error::Task(e.to_string()))
        .and_then(|result| result);

        match projected {
            // A stop may have landed while the projection was in flight.
            Ok(_) if scope.is_cancelled() => {
                debug!("Rescaling cancelled in iteration {}", index);
                events.publish(SimulationEvent::RescaleCancelled { at: index });
                return report(index, PassStatus::Cancelled);
            }
            Ok(points) => {
                if let Some(path) = paths.write().get_mut(index) {
                    path.set_canvas_points(points);
                }
                debug!("Rescaled sample path {}", index);
                events.publish(SimulationEvent::PathRescaled { index });
            }
            Err(e) if e.is_cancelled() => {
                debug!("Rescaling cancelled in iteration {}", index);
                events.publish(SimulationEvent::RescaleCancelled { at: index });
                return report(index, PassStatus::Cancelled);
            }
            Err(e) => {
                warn!("Rescaling sample path {} failed: {}", index, e);
                events.publish(SimulationEvent::RescaleFailed {
                    index,
                    reason: e.to_string(),
                });
                return report(index, PassStatus::Failed);
            }
        }
    }

    report(job.upto, PassStatus::Finished)
}
