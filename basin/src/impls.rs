use std::convert::Infallible;
use std::sync::{mpsc, Arc, Mutex, MutexGuard};

use crate::Sink;

/// Discards every item.
#[derive(Debug, Clone, Copy, Default)]
pub struct DropSink;

impl<T> Sink<T> for DropSink {
    type Error = Infallible;

    #[inline]
    fn send(&mut self, _item: T) -> Result<(), Infallible> {
        Ok(())
    }
}

/// Collects items into a `Vec` in arrival order.
#[derive(Debug, Clone, Default)]
pub struct CollectSink<T> {
    items: Vec<T>,
}

impl<T> CollectSink<T> {
    /// Create an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// View the collected items.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of items collected so far.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing has been collected.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Take the collected items, leaving an empty collector behind.
    pub fn take(&mut self) -> Vec<T> {
        std::mem::take(&mut self.items)
    }

    /// Consume the sink and return the collected items.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> Sink<T> for CollectSink<T> {
    type Error = Infallible;

    #[inline]
    fn send(&mut self, item: T) -> Result<(), Infallible> {
        self.items.push(item);
        Ok(())
    }

    #[inline]
    fn send_all(&mut self, items: impl Iterator<Item = T>) -> Result<(), Infallible> {
        self.items.extend(items);
        Ok(())
    }
}

/// Calls a closure for each item.
#[derive(Debug)]
pub struct FnSink<F>(pub F);

impl<T, F: FnMut(T)> Sink<T> for FnSink<F> {
    type Error = Infallible;

    #[inline]
    fn send(&mut self, item: T) -> Result<(), Infallible> {
        (self.0)(item);
        Ok(())
    }
}

/// Forwards items into an `mpsc` channel.
#[derive(Debug, Clone)]
pub struct ChannelSink<T> {
    sender: mpsc::Sender<T>,
}

impl<T> ChannelSink<T> {
    /// Wrap a channel sender.
    pub fn new(sender: mpsc::Sender<T>) -> Self {
        Self { sender }
    }

    /// Consume the sink and return the sender.
    pub fn into_sender(self) -> mpsc::Sender<T> {
        self.sender
    }
}

impl<T> Sink<T> for ChannelSink<T> {
    type Error = mpsc::SendError<T>;

    #[inline]
    fn send(&mut self, item: T) -> Result<(), Self::Error> {
        self.sender.send(item)
    }
}

/// Shares one sink between threads behind a mutex.
///
/// Appends are serialized by the lock; the wrapped sink itself stays
/// single-threaded. A poisoned lock is recovered rather than propagated;
/// appends are the only mutation, so a panicking thread cannot leave the
/// inner sink in a torn state.
#[derive(Debug, Default)]
pub struct SharedSink<S> {
    inner: Arc<Mutex<S>>,
}

impl<S> Clone for SharedSink<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> SharedSink<S> {
    /// Wrap a sink for shared use.
    pub fn new(sink: S) -> Self {
        Self {
            inner: Arc::new(Mutex::new(sink)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, S> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Run a closure against the inner sink while holding the lock.
    pub fn with<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        f(&mut self.lock())
    }

    /// Unwrap the inner sink if this is the last handle.
    pub fn try_into_inner(self) -> Option<S> {
        Arc::try_unwrap(self.inner)
            .ok()
            .map(|mutex| match mutex.into_inner() {
                Ok(sink) => sink,
                Err(poisoned) => poisoned.into_inner(),
            })
    }
}

impl<T: Clone> SharedSink<CollectSink<T>> {
    /// Copy out the items collected so far.
    #[must_use]
    pub fn snapshot(&self) -> Vec<T> {
        self.lock().items().to_vec()
    }
}

impl<T, S: Sink<T>> Sink<T> for SharedSink<S> {
    type Error = S::Error;

    #[inline]
    fn send(&mut self, item: T) -> Result<(), Self::Error> {
        self.lock().send(item)
    }

    #[inline]
    fn flush(&mut self) -> Result<(), Self::Error> {
        self.lock().flush()
    }
}
