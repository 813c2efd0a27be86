//! Wire transport: the push-protocol writer and its response boundary.
//!
//! ## Contents
//! - [`ResponseSink`]: capability trait the HTTP layer implements
//! - [`StreamWriter`]: encodes events as text/event-stream records
//! - [`EVENT_STREAM_HEADERS`]: headers set before the first record

mod sink;
mod writer;

pub use sink::{ResponseSink, EVENT_STREAM_HEADERS};
pub use writer::StreamWriter;

#[cfg(test)]
pub(crate) use sink::testing;
