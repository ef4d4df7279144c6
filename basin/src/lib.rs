//! Append-only destinations for pipeline output.

#![warn(missing_docs)]

mod impls;
mod traits;


pub use impls::{ChannelSink, CollectSink, DropSink, FnSink, SharedSink};
pub use traits::Sink;
