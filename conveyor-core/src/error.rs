//! Error types for buffer and consumer operations.
//!
//! The buffer errors are hand-rolled enums rather than derive-macro types
//! because they carry the rejected item back to the caller by value; no
//! item is ever silently lost on an error path.

use std::fmt;

use snafu::Snafu;

/// Error returned by [`BoundedBuffer::put`](crate::BoundedBuffer::put).
#[derive(Debug, PartialEq, Eq)]
pub enum PutError<T> {
    /// The buffer is closed; the rejected item is handed back.
    Closed(T),
}

impl<T> PutError<T> {
    /// Recover the item that was not enqueued.
    #[must_use]
    pub fn into_inner(self) -> T {
        match self {
            PutError::Closed(item) => item,
        }
    }
}

impl<T> fmt::Display for PutError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PutError::Closed(_) => f.write_str("bounded buffer is closed"),
        }
    }
}

impl<T: fmt::Debug> std::error::Error for PutError<T> {}

/// Error returned by [`BoundedBuffer::try_put`](crate::BoundedBuffer::try_put).
#[derive(Debug, PartialEq, Eq)]
pub enum TryPutError<T> {
    /// The buffer was at capacity; the item is handed back.
    Full(T),
    /// The buffer is closed; the item is handed back.
    Closed(T),
}

impl<T> TryPutError<T> {
    /// Recover the item that was not enqueued.
    #[must_use]
    pub fn into_inner(self) -> T {
        match self {
            TryPutError::Full(item) | TryPutError::Closed(item) => item,
        }
    }
}

impl<T> fmt::Display for TryPutError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TryPutError::Full(_) => f.write_str("bounded buffer is full"),
            TryPutError::Closed(_) => f.write_str("bounded buffer is closed"),
        }
    }
}

impl<T: fmt::Debug> std::error::Error for TryPutError<T> {}

/// Error returned by [`BoundedBuffer::put_timeout`](crate::BoundedBuffer::put_timeout).
#[derive(Debug, PartialEq, Eq)]
pub enum PutTimeoutError<T> {
    /// The wait elapsed before space became available; the item is handed back.
    Timeout(T),
    /// The buffer is closed; the item is handed back.
    Closed(T),
}

impl<T> PutTimeoutError<T> {
    /// Recover the item that was not enqueued.
    #[must_use]
    pub fn into_inner(self) -> T {
        match self {
            PutTimeoutError::Timeout(item) | PutTimeoutError::Closed(item) => item,
        }
    }
}

impl<T> fmt::Display for PutTimeoutError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PutTimeoutError::Timeout(_) => {
                f.write_str("timed out waiting for buffer space")
            }
            PutTimeoutError::Closed(_) => f.write_str("bounded buffer is closed"),
        }
    }
}

impl<T: fmt::Debug> std::error::Error for PutTimeoutError<T> {}

/// The wait elapsed before an item arrived.
///
/// Returned by [`BoundedBuffer::get_timeout`](crate::BoundedBuffer::get_timeout);
/// distinct from the `Ok(None)` end-of-stream sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Snafu)]
#[snafu(display("timed out waiting for an item"))]
pub struct GetTimeoutError;

/// A consumer's transform rejected an item.
///
/// Reported per item; whether the consumer skips the item or halts is
/// decided by its [`TransformErrorPolicy`](crate::TransformErrorPolicy).
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(display("transform failed: {message}"))]
pub struct TransformError {
    /// Why the item was rejected.
    pub message: String,
}

impl TransformError {
    /// Create a transform error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
