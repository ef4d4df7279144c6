//! Cooperative stop signaling.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative stop signal shared between threads.
///
/// Cloned handles observe the same flag. Workers check it between buffer
/// operations; it never interrupts a thread already parked in `put`/`get`.
/// Unblocking those requires [`BoundedBuffer::close`](crate::BoundedBuffer::close).
#[derive(Debug, Clone, Default)]
pub struct StopFlag {
    flag: Arc<AtomicBool>,
}

impl StopFlag {
    /// Create an unset flag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that observers stop at their next check.
    pub fn stop(&self) {
        // Release pairs with the Acquire in is_set so work done before the
        // request is visible to the observer that honors it.
        self.flag.store(true, Ordering::Release);
    }

    /// Returns `true` once [`stop`](Self::stop) has been called on any handle.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}
