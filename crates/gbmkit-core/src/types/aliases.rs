//! Type aliases for commonly used shared-state types.
//!
//! The engine shares its output sequence between the run's main line and
//! background rescale passes. These aliases name the wrappers used for that.

use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

/// A thread-safe, mutex-protected wrapper for cross-thread sharing.
///
/// Uses `parking_lot::Mutex` for better performance than `std::sync::Mutex`.
pub type ThreadSafe<T> = Arc<Mutex<T>>;

/// A thread-safe reader-writer lock wrapper for read-heavy workloads.
///
/// Drawing surfaces read far more often than the engine writes.
pub type ThreadSafeRw<T> = Arc<RwLock<T>>;

/// A thread-safe, reader-writer protected vector.
pub type ThreadSafeVec<T> = Arc<RwLock<Vec<T>>>;

/// Create a new `ThreadSafe<T>` from a value.
#[inline]
pub fn thread_safe<T>(value: T) -> ThreadSafe<T> {
    Arc::new(Mutex::new(value))
}

/// Create a new `ThreadSafeRw<T>` from a value.
#[inline]
pub fn thread_safe_rw<T>(value: T) -> ThreadSafeRw<T> {
    Arc::new(RwLock::new(value))
}
