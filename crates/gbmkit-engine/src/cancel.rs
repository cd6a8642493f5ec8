//! Cooperative cancellation for long-running engine steps.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use gbmkit_core::{Error, Result};

/// A shareable, one-shot cancellation flag.
///
/// Clones observe the same flag. Cancelling is idempotent and can never be
/// undone; a fresh scope is created instead.
#[derive(Debug, Clone, Default)]
pub struct CancelScope {
    cancelled: Arc<AtomicBool>,
}

impl CancelScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Checkpoint: fails with [`Error::Cancelled`] once cancellation was
    /// requested.
    #[inline]
    pub fn checkpoint(&self, completed: usize, total: usize) -> Result<()> {
        if self.is_cancelled() {
            return Err(Error::Cancelled { completed, total });
        }
        Ok(())
    }
}

/// The two independent scopes of one run.
#[derive(Debug, Clone, Default)]
pub struct RunScopes {
    /// Guards path generation and main-line projection.
    pub drawing: CancelScope,
    /// Guards the active rescale pass. Replaced on every widen.
    pub rescale: CancelScope,
}

impl RunScopes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel both scopes
    pub fn cancel_all(&self) {
        self.drawing.cancel();
        self.rescale.cancel();
    }

    /// True once the run itself has been stopped
    pub fn is_stopped(&self) -> bool {
        self.drawing.is_cancelled()
    }
}
