//! Blocking bounded-buffer pipelines: a fixed-capacity FIFO that
//! coordinates producer and consumer threads to a race-free shutdown.

pub use conveyor_core::*;

/// Prelude for convenient imports.
pub mod prelude {
    pub use basin::{ChannelSink, CollectSink, DropSink, FnSink, SharedSink, Sink};
    pub use conveyor_core::{
        BoundedBuffer, Consumer, ConsumerOutcome, Pipeline, PipelineReport, Producer,
        ProducerOutcome, PutError, Role, StopFlag, TransformError, TransformErrorPolicy,
    };
}
