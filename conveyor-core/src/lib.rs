//! Blocking bounded FIFO buffer coordinating producer and consumer threads
//! under a fixed capacity, with race-free shutdown.
//!
//! The [`BoundedBuffer`] is the only shared mutable resource: writers block
//! when it is full, readers block when it is empty, and [`close`]
//! transitions it into a terminal state that unblocks everyone: writers
//! fail fast, readers drain what is buffered and then observe end-of-stream.
//!
//! [`Producer`] and [`Consumer`] are the execution units that drive the
//! buffer from independent threads; [`Pipeline`] is the thin entry point
//! that composes N producers and M consumers over one buffer and joins them.
//!
//! [`close`]: BoundedBuffer::close

#![warn(missing_docs)]

mod buffer;
mod consumer;
mod error;
mod pipeline;
mod producer;
mod stop;

#[cfg(test)]
mod tests;

pub use buffer::BoundedBuffer;
pub use consumer::{Consumer, ConsumerOutcome, Transform, TransformErrorPolicy};
pub use error::{GetTimeoutError, PutError, PutTimeoutError, TransformError, TryPutError};
pub use pipeline::{Pipeline, PipelineBuilder, PipelineReport};
pub use producer::{Producer, ProducerOutcome, Role};
pub use stop::StopFlag;
