//! Consumer execution unit: drains a buffer into a sink.

use std::convert::Infallible;
use std::thread::{self, JoinHandle};

use basin::Sink;
use tracing::{debug, warn};

use crate::buffer::BoundedBuffer;
use crate::error::TransformError;
use crate::stop::StopFlag;

/// Boxed per-item transform. Must be a pure function of the item.
pub type Transform<T> = Box<dyn FnMut(T) -> Result<T, TransformError> + Send>;

/// What a consumer does when its transform rejects an item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransformErrorPolicy {
    /// Log the failure, count the item as skipped, keep consuming.
    #[default]
    Skip,
    /// Stop consuming; the error is reported in the outcome.
    Halt,
}

/// Terminal state of a consumer run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsumerOutcome {
    /// The buffer was closed and fully drained.
    Finished {
        /// Items delivered to the sink.
        delivered: usize,
        /// Items rejected by the transform and skipped.
        skipped: usize,
    },
    /// The stop flag was observed between gets.
    Stopped {
        /// Items delivered to the sink.
        delivered: usize,
        /// Items rejected by the transform and skipped.
        skipped: usize,
    },
    /// The transform failed under [`TransformErrorPolicy::Halt`].
    Failed {
        /// Items delivered to the sink before the failure.
        delivered: usize,
        /// Items skipped before the failure (always 0 under `Halt`).
        skipped: usize,
        /// The per-item failure that halted the run.
        error: TransformError,
    },
}

impl ConsumerOutcome {
    /// Items this consumer appended to its sink.
    #[must_use]
    pub fn delivered(&self) -> usize {
        match self {
            ConsumerOutcome::Finished { delivered, .. }
            | ConsumerOutcome::Stopped { delivered, .. }
            | ConsumerOutcome::Failed { delivered, .. } => *delivered,
        }
    }
}

/// Drains a [`BoundedBuffer`] into a sink, optionally transforming each item.
///
/// The sink must be infallible; when several consumers share one
/// destination, wrap it in [`basin::SharedSink`] so appends carry their own
/// lock discipline, separate from the buffer's.
///
/// The stop flag is checked *before* each `get`, never during one: a
/// consumer already parked in `get` completes that cycle unless the buffer
/// is also closed.
pub struct Consumer<T, S: Sink<T, Error = Infallible>> {
    buffer: BoundedBuffer<T>,
    sink: S,
    transform: Option<Transform<T>>,
    stop: StopFlag,
    policy: TransformErrorPolicy,
}

impl<T, S: Sink<T, Error = Infallible>> Consumer<T, S> {
    /// Create a consumer draining `buffer` into `sink`.
    pub fn new(buffer: BoundedBuffer<T>, sink: S) -> Self {
        Self {
            buffer,
            sink,
            transform: None,
            stop: StopFlag::new(),
            policy: TransformErrorPolicy::default(),
        }
    }

    /// Apply a transform to each item before it reaches the sink.
    #[must_use]
    pub fn with_transform(
        mut self,
        transform: impl FnMut(T) -> Result<T, TransformError> + Send + 'static,
    ) -> Self {
        self.transform = Some(Box::new(transform));
        self
    }

    /// Attach a stop flag, checked before each get.
    #[must_use]
    pub fn with_stop(mut self, stop: StopFlag) -> Self {
        self.stop = stop;
        self
    }

    /// Choose what happens when the transform rejects an item.
    #[must_use]
    pub fn on_transform_error(mut self, policy: TransformErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Run to completion on the calling thread, returning the sink alongside
    /// the outcome so collected items stay reachable.
    pub fn run(mut self) -> (S, ConsumerOutcome) {
        let mut delivered = 0;
        let mut skipped = 0;

        loop {
            if self.stop.is_set() {
                debug!(delivered, skipped, "consumer stopped by flag");
                return (self.sink, ConsumerOutcome::Stopped { delivered, skipped });
            }

            let Some(item) = self.buffer.get() else {
                debug!(delivered, skipped, "buffer closed and drained");
                return (self.sink, ConsumerOutcome::Finished { delivered, skipped });
            };

            let item = match &mut self.transform {
                None => item,
                Some(transform) => match transform(item) {
                    Ok(item) => item,
                    Err(error) => match self.policy {
                        TransformErrorPolicy::Skip => {
                            warn!(%error, "transform rejected item, skipping");
                            skipped += 1;
                            continue;
                        }
                        TransformErrorPolicy::Halt => {
                            warn!(%error, "transform rejected item, halting consumer");
                            return (
                                self.sink,
                                ConsumerOutcome::Failed {
                                    delivered,
                                    skipped,
                                    error,
                                },
                            );
                        }
                    },
                },
            };

            match self.sink.send(item) {
                Ok(()) => delivered += 1,
                Err(never) => match never {},
            }
        }
    }
}

impl<T, S> Consumer<T, S>
where
    T: Send + 'static,
    S: Sink<T, Error = Infallible> + Send + 'static,
{
    /// Run on a new thread; sink and outcome come back through the handle.
    pub fn spawn(self) -> JoinHandle<(S, ConsumerOutcome)> {
        thread::spawn(move || self.run())
    }
}
