//! Producer execution unit: feeds a source sequence into a buffer.

use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use crate::buffer::BoundedBuffer;
use crate::error::PutError;
use crate::stop::StopFlag;

/// Close-ownership role of a producer.
///
/// Exactly one actor should decide when the buffer stops accepting items;
/// encoding that decision as a variant keeps the single-close invariant out
/// of convention and in the type. `close()` itself tolerates racing calls,
/// so a misconfigured second owner degrades safely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Closes the buffer when this producer exits, on every exit path.
    Owner,
    /// Terminates without closing; someone else owns shutdown.
    Participant,
}

/// Terminal state of a producer run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProducerOutcome {
    /// The source sequence was exhausted.
    Finished {
        /// Items accepted by the buffer.
        sent: usize,
    },
    /// The stop flag was observed between puts.
    Stopped {
        /// Items accepted by the buffer.
        sent: usize,
    },
    /// The buffer was closed by another actor mid-run. The one in-flight
    /// item was rejected and dropped; `dropped` reports it rather than
    /// hiding it.
    ClosedEarly {
        /// Items accepted by the buffer before the close.
        sent: usize,
        /// Items rejected by the closed buffer (always 1).
        dropped: usize,
    },
}

impl ProducerOutcome {
    /// Items this producer successfully handed to the buffer.
    #[must_use]
    pub fn sent(&self) -> usize {
        match self {
            ProducerOutcome::Finished { sent }
            | ProducerOutcome::Stopped { sent }
            | ProducerOutcome::ClosedEarly { sent, .. } => *sent,
        }
    }
}

/// Feeds a finite source sequence into a [`BoundedBuffer`], in source order.
///
/// Each producer preserves its own source's order; interleaving between
/// producers is whatever the enqueue race produces.
pub struct Producer<T> {
    source: Vec<T>,
    buffer: BoundedBuffer<T>,
    role: Role,
    stop: StopFlag,
}

impl<T> Producer<T> {
    /// Create a producer over `source`, pushing into `buffer`.
    pub fn new(source: Vec<T>, buffer: BoundedBuffer<T>, role: Role) -> Self {
        Self {
            source,
            buffer,
            role,
            stop: StopFlag::new(),
        }
    }

    /// Attach a stop flag, checked before each put.
    #[must_use]
    pub fn with_stop(mut self, stop: StopFlag) -> Self {
        self.stop = stop;
        self
    }

    /// Run to completion on the calling thread.
    pub fn run(mut self) -> ProducerOutcome {
        let mut sent = 0;
        let mut early_exit = None;

        for item in self.source.drain(..) {
            if self.stop.is_set() {
                debug!(sent, "producer stopped by flag");
                early_exit = Some(ProducerOutcome::Stopped { sent });
                break;
            }
            match self.buffer.put(item) {
                Ok(()) => sent += 1,
                Err(PutError::Closed(_)) => {
                    warn!(sent, "buffer closed mid-run, dropping in-flight item");
                    early_exit = Some(ProducerOutcome::ClosedEarly { sent, dropped: 1 });
                    break;
                }
            }
        }

        // Owner closes on every exit path, mirroring a finally block; close
        // is idempotent so this is safe even when the buffer closed under us.
        if self.role == Role::Owner {
            self.buffer.close();
            debug!(sent, "owner producer closed the buffer");
        }

        early_exit.unwrap_or(ProducerOutcome::Finished { sent })
    }
}

impl<T: Send + 'static> Producer<T> {
    /// Run on a new thread; the outcome is observable via the handle.
    pub fn spawn(self) -> JoinHandle<ProducerOutcome> {
        thread::spawn(move || self.run())
    }
}
