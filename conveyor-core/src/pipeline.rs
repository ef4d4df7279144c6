//! Composition glue: N producers, one buffer, M consumers, one shared sink.

use std::sync::Arc;
use std::thread;

use basin::{CollectSink, SharedSink};
use tracing::{debug, warn};

use crate::buffer::BoundedBuffer;
use crate::consumer::{Consumer, ConsumerOutcome, TransformErrorPolicy};
use crate::error::TransformError;
use crate::producer::{Producer, ProducerOutcome, Role};
use crate::stop::StopFlag;

type SharedTransform<T> = Arc<dyn Fn(T) -> Result<T, TransformError> + Send + Sync>;

/// Everything a finished pipeline run leaves behind.
#[derive(Debug)]
pub struct PipelineReport<T> {
    /// Sink contents, in delivery order across all consumers.
    pub items: Vec<T>,
    /// Per-producer terminal states, in configuration order.
    pub producers: Vec<ProducerOutcome>,
    /// Per-consumer terminal states, in spawn order.
    pub consumers: Vec<ConsumerOutcome>,
}

impl<T> PipelineReport<T> {
    /// Total items delivered across all consumers.
    #[must_use]
    pub fn delivered(&self) -> usize {
        self.consumers.iter().map(ConsumerOutcome::delivered).sum()
    }
}

/// One-shot composition of producers and consumers over a single buffer.
///
/// Start from [`Pipeline::builder`].
pub struct Pipeline;

impl Pipeline {
    /// Create a builder for a pipeline over a buffer of `capacity`.
    ///
    /// # Panics
    ///
    /// `run()` panics if `capacity` is zero or no source was configured;
    /// contract violations fail fast at construction, never mid-flight.
    #[must_use]
    pub fn builder<T>(capacity: usize) -> PipelineBuilder<T> {
        PipelineBuilder {
            capacity,
            sources: Vec::new(),
            consumers: 1,
            transform: None,
            policy: TransformErrorPolicy::default(),
            stop: StopFlag::new(),
        }
    }
}

/// Builder configuring sources, consumer count, transform, and error policy.
pub struct PipelineBuilder<T> {
    capacity: usize,
    sources: Vec<Vec<T>>,
    consumers: usize,
    transform: Option<SharedTransform<T>>,
    policy: TransformErrorPolicy,
    stop: StopFlag,
}

impl<T: Send + 'static> PipelineBuilder<T> {
    /// Add a source sequence; each source gets its own producer thread.
    #[must_use]
    pub fn source(mut self, items: impl Into<Vec<T>>) -> Self {
        self.sources.push(items.into());
        self
    }

    /// Set the number of consumer threads (default 1).
    #[must_use]
    pub fn consumers(mut self, count: usize) -> Self {
        assert!(count > 0, "must have at least one consumer");
        self.consumers = count;
        self
    }

    /// Apply a transform to every item; shared by all consumers, so it must
    /// be a pure function of the item.
    #[must_use]
    pub fn transform(
        mut self,
        transform: impl Fn(T) -> Result<T, TransformError> + Send + Sync + 'static,
    ) -> Self {
        self.transform = Some(Arc::new(transform));
        self
    }

    /// Choose what consumers do when the transform rejects an item.
    #[must_use]
    pub fn on_transform_error(mut self, policy: TransformErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Share a stop flag with every worker in the pipeline.
    #[must_use]
    pub fn stop_flag(mut self, stop: StopFlag) -> Self {
        self.stop = stop;
        self
    }

    /// Spawn all workers, join them, and report.
    ///
    /// Close ownership: a single source makes its producer the
    /// [`Role::Owner`]; with several sources every producer is a
    /// [`Role::Participant`] and the pipeline closes the buffer itself once
    /// all producers have joined, so no consumer can see a premature
    /// end-of-stream.
    ///
    /// A consumer that fails under [`TransformErrorPolicy::Halt`] raises the
    /// stop flag and closes the buffer on its way out, releasing producers
    /// parked on a full buffer; `run()` always returns.
    ///
    /// # Panics
    ///
    /// Panics if no source was configured, or if a worker thread panics.
    #[must_use]
    pub fn run(self) -> PipelineReport<T> {
        assert!(!self.sources.is_empty(), "pipeline needs at least one source");

        let buffer = BoundedBuffer::new(self.capacity);
        let sink = SharedSink::new(CollectSink::new());
        let single_source = self.sources.len() == 1;

        debug!(
            capacity = self.capacity,
            producers = self.sources.len(),
            consumers = self.consumers,
            "starting pipeline"
        );

        let producer_handles: Vec<_> = self
            .sources
            .into_iter()
            .map(|source| {
                let role = if single_source {
                    Role::Owner
                } else {
                    Role::Participant
                };
                Producer::new(source, buffer.clone(), role)
                    .with_stop(self.stop.clone())
                    .spawn()
            })
            .collect();

        let consumer_handles: Vec<_> = (0..self.consumers)
            .map(|_| {
                let mut consumer = Consumer::new(buffer.clone(), sink.clone())
                    .with_stop(self.stop.clone())
                    .on_transform_error(self.policy);
                if let Some(transform) = &self.transform {
                    let transform = Arc::clone(transform);
                    consumer = consumer.with_transform(move |item| transform(item));
                }
                let buffer = buffer.clone();
                let stop = self.stop.clone();
                thread::spawn(move || {
                    let (sink, outcome) = consumer.run();
                    // A failed consumer stops draining, which can leave a
                    // producer parked on a full buffer. Shut the pipeline
                    // down so the joins below cannot wait on it forever.
                    if matches!(outcome, ConsumerOutcome::Failed { .. }) {
                        warn!("consumer failed, shutting the pipeline down");
                        stop.stop();
                        buffer.close();
                    }
                    (sink, outcome)
                })
            })
            .collect();

        let producers: Vec<_> = producer_handles
            .into_iter()
            .map(|handle| handle.join().expect("producer thread panicked"))
            .collect();

        // With multiple participants nobody owns the close; do it here, after
        // every producer has joined.
        if !single_source {
            buffer.close();
        }

        let consumers: Vec<_> = consumer_handles
            .into_iter()
            .map(|handle| handle.join().expect("consumer thread panicked").1)
            .collect();

        let items = sink.with(CollectSink::take);

        PipelineReport {
            items,
            producers,
            consumers,
        }
    }
}
