//! Blocking bounded FIFO buffer with a terminal closed state.

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use crate::error::{GetTimeoutError, PutError, PutTimeoutError, TryPutError};

pub(crate) struct Inner<T> {
    queue: VecDeque<T>,
    capacity: usize,
    closed: bool,
}

pub(crate) struct Shared<T> {
    pub(crate) inner: Mutex<Inner<T>>,
    pub(crate) not_full: Condvar,
    pub(crate) not_empty: Condvar,
}

impl<T> Shared<T> {
    fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                queue: VecDeque::with_capacity(capacity),
                capacity,
                closed: false,
            }),
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
        }
    }

    /// Lock the state, recovering from poison. Appends and removals are the
    /// only mutations, and both complete before the lock is released, so a
    /// panicking thread cannot leave the queue torn.
    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn wait_not_full<'a>(&self, guard: MutexGuard<'a, Inner<T>>) -> MutexGuard<'a, Inner<T>> {
        match self.not_full.wait(guard) {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn wait_not_empty<'a>(&self, guard: MutexGuard<'a, Inner<T>>) -> MutexGuard<'a, Inner<T>> {
        match self.not_empty.wait(guard) {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn wait_not_full_timeout<'a>(
        &self,
        guard: MutexGuard<'a, Inner<T>>,
        timeout: Duration,
    ) -> MutexGuard<'a, Inner<T>> {
        match self.not_full.wait_timeout(guard, timeout) {
            Ok((guard, _)) => guard,
            Err(poisoned) => poisoned.into_inner().0,
        }
    }

    fn wait_not_empty_timeout<'a>(
        &self,
        guard: MutexGuard<'a, Inner<T>>,
        timeout: Duration,
    ) -> MutexGuard<'a, Inner<T>> {
        match self.not_empty.wait_timeout(guard, timeout) {
            Ok((guard, _)) => guard,
            Err(poisoned) => poisoned.into_inner().0,
        }
    }
}

/// Fixed-capacity FIFO queue that blocks writers when full and readers when
/// empty, with an explicit terminal "closed" state for clean shutdown.
///
/// The handle is cheap to clone; all clones share one queue. Items flow
/// through by value, so ownership moves from producer to consumer.
///
/// Every condition wait sits in a predicate re-check loop, so spurious
/// wakeups are harmless, and [`close`](Self::close) notifies *all* waiters
/// so neither a parked writer nor a parked reader can be left behind.
///
/// # Example
///
/// ```
/// use std::thread;
///
/// use conveyor_core::BoundedBuffer;
///
/// let buffer = BoundedBuffer::new(2);
/// buffer.put(1).unwrap();
///
/// let reader = {
///     let buffer = buffer.clone();
///     thread::spawn(move || buffer.get())
/// };
///
/// buffer.put(2).unwrap();
/// buffer.close();
///
/// assert_eq!(reader.join().unwrap(), Some(1));
/// assert_eq!(buffer.get(), Some(2));
/// assert_eq!(buffer.get(), None); // closed and drained
/// ```
pub struct BoundedBuffer<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for BoundedBuffer<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> BoundedBuffer<T> {
    /// Create a buffer holding at most `capacity` items.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero; a zero-capacity buffer could never
    /// accept an item and would deadlock its first writer.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be positive");
        Self {
            shared: Arc::new(Shared::new(capacity)),
        }
    }

    /// Insert an item, blocking while the buffer is full and open.
    ///
    /// Wakes one parked reader on success.
    ///
    /// # Errors
    ///
    /// Returns [`PutError::Closed`] with the item if the buffer is closed,
    /// or becomes closed while waiting for space.
    pub fn put(&self, item: T) -> Result<(), PutError<T>> {
        let mut guard = self.shared.lock();
        loop {
            if guard.closed {
                return Err(PutError::Closed(item));
            }
            if guard.queue.len() < guard.capacity {
                guard.queue.push_back(item);
                drop(guard);
                self.shared.not_empty.notify_one();
                return Ok(());
            }
            guard = self.shared.wait_not_full(guard);
        }
    }

    /// Insert an item without blocking.
    ///
    /// # Errors
    ///
    /// Returns [`TryPutError::Full`] or [`TryPutError::Closed`] with the
    /// item when it cannot be accepted immediately.
    pub fn try_put(&self, item: T) -> Result<(), TryPutError<T>> {
        let mut guard = self.shared.lock();
        if guard.closed {
            return Err(TryPutError::Closed(item));
        }
        if guard.queue.len() >= guard.capacity {
            return Err(TryPutError::Full(item));
        }
        guard.queue.push_back(item);
        drop(guard);
        self.shared.not_empty.notify_one();
        Ok(())
    }

    /// Insert an item, blocking for at most `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`PutTimeoutError::Timeout`] when the wait elapses with the
    /// buffer still full, or [`PutTimeoutError::Closed`] when the buffer is
    /// or becomes closed. The item is handed back either way.
    pub fn put_timeout(&self, item: T, timeout: Duration) -> Result<(), PutTimeoutError<T>> {
        let deadline = Instant::now() + timeout;
        let mut guard = self.shared.lock();
        loop {
            if guard.closed {
                return Err(PutTimeoutError::Closed(item));
            }
            if guard.queue.len() < guard.capacity {
                guard.queue.push_back(item);
                drop(guard);
                self.shared.not_empty.notify_one();
                return Ok(());
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(PutTimeoutError::Timeout(item));
            }
            guard = self.shared.wait_not_full_timeout(guard, remaining);
        }
    }

    /// Remove the oldest item, blocking while the buffer is empty and open.
    ///
    /// Items already buffered are still returned after [`close`](Self::close);
    /// `None` is the end-of-stream sentinel, returned only once the buffer is
    /// closed *and* drained. Wakes one parked writer on success.
    pub fn get(&self) -> Option<T> {
        let mut guard = self.shared.lock();
        loop {
            if let Some(item) = guard.queue.pop_front() {
                drop(guard);
                self.shared.not_full.notify_one();
                return Some(item);
            }
            if guard.closed {
                return None;
            }
            guard = self.shared.wait_not_empty(guard);
        }
    }

    /// Remove the oldest item without blocking.
    ///
    /// Returns `None` when the buffer is momentarily empty; unlike
    /// [`get`](Self::get) this says nothing about end-of-stream.
    #[must_use]
    pub fn try_get(&self) -> Option<T> {
        let mut guard = self.shared.lock();
        let item = guard.queue.pop_front();
        if item.is_some() {
            drop(guard);
            self.shared.not_full.notify_one();
        }
        item
    }

    /// Remove the oldest item, blocking for at most `timeout`.
    ///
    /// `Ok(None)` is the closed-and-drained sentinel, exactly as for
    /// [`get`](Self::get).
    ///
    /// # Errors
    ///
    /// Returns [`GetTimeoutError`] when the wait elapses with the buffer
    /// still empty and open.
    pub fn get_timeout(&self, timeout: Duration) -> Result<Option<T>, GetTimeoutError> {
        let deadline = Instant::now() + timeout;
        let mut guard = self.shared.lock();
        loop {
            if let Some(item) = guard.queue.pop_front() {
                drop(guard);
                self.shared.not_full.notify_one();
                return Ok(Some(item));
            }
            if guard.closed {
                return Ok(None);
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(GetTimeoutError);
            }
            guard = self.shared.wait_not_empty_timeout(guard, remaining);
        }
    }

    /// Close the buffer: no further inserts are accepted, items already
    /// buffered remain retrievable.
    ///
    /// Wakes **all** parked writers (which fail with `Closed`) and readers
    /// (which drain, then observe end-of-stream). Idempotent: closing an
    /// already-closed buffer is a no-op.
    pub fn close(&self) {
        let mut guard = self.shared.lock();
        if guard.closed {
            return;
        }
        guard.closed = true;
        drop(guard);
        self.shared.not_full.notify_all();
        self.shared.not_empty.notify_all();
    }

    /// Returns `true` once [`close`](Self::close) has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.shared.lock().closed
    }

    /// Advisory snapshot of the current item count.
    ///
    /// May be stale the moment it returns under concurrent access; use it
    /// for diagnostics, never for control decisions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shared.lock().queue.len()
    }

    /// Returns `true` when the buffer holds no items (advisory).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` when the buffer is at capacity (advisory).
    #[must_use]
    pub fn is_full(&self) -> bool {
        let guard = self.shared.lock();
        guard.queue.len() == guard.capacity
    }

    /// The fixed capacity this buffer was created with.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.shared.lock().capacity
    }

    #[cfg(test)]
    pub(crate) fn shared(&self) -> &Shared<T> {
        &self.shared
    }
}
