//! # Stream writer: the push-protocol encoder.
//!
//! Consumes events from the fan-in queue in arrival order and writes each
//! one onto the response using text/event-stream framing:
//!
//! ```text
//! event: <name>\n        (omitted for unnamed events)
//! data: <payload>\n
//! \n
//! ```
//!
//! Every record is flushed individually; the client sees an event as soon as
//! it is written. The loop ends on cancellation (remaining queued events are
//! abandoned, the client is assumed gone) or when the queue closes because
//! every producer has finished.

use tokio_util::sync::CancellationToken;

use crate::error::StreamError;
use crate::events::{Event, EventDrain};
use crate::transport::sink::{ResponseSink, EVENT_STREAM_HEADERS};

/// Push-protocol writer bound to one open response.
pub struct StreamWriter {
    sink: Box<dyn ResponseSink>,
}

impl StreamWriter {
    /// Wraps an open response.
    pub fn new(sink: impl ResponseSink + 'static) -> Self {
        Self {
            sink: Box::new(sink),
        }
    }

    /// Streams events until cancellation or queue closure.
    ///
    /// Rejects the sink with [`StreamError::FlushUnsupported`] before
    /// writing anything when it cannot deliver records incrementally; the
    /// caller can still answer with a plain error response. Otherwise the
    /// stream headers are set exactly once, then records flow until the
    /// session ends. A failed write or flush is fatal.
    pub async fn stream(
        &mut self,
        drain: &mut EventDrain,
        token: &CancellationToken,
    ) -> Result<(), StreamError> {
        if !self.sink.supports_flush() {
            return Err(StreamError::FlushUnsupported);
        }
        for (name, value) in EVENT_STREAM_HEADERS {
            self.sink.insert_header(name, value);
        }

        loop {
            tokio::select! {
                // Cancellation wins over a ready event; nothing is written
                // past the cancellation point.
                biased;
                _ = token.cancelled() => break,
                next = drain.pull() => match next {
                    Some(event) => self.write_event(&event).await?,
                    None => break,
                },
            }
        }
        Ok(())
    }

    async fn write_event(&mut self, event: &Event) -> Result<(), StreamError> {
        let record = encode(event);
        self.sink.write_all(&record).await?;
        self.sink.flush().await?;
        Ok(())
    }
}

/// Encodes one event as a text/event-stream record. An empty name is
/// treated as unnamed.
fn encode(event: &Event) -> Vec<u8> {
    let mut record = Vec::with_capacity(event.payload().len() + 32);
    if let Some(name) = event.name().filter(|name| !name.is_empty()) {
        record.extend_from_slice(b"event: ");
        record.extend_from_slice(name.as_bytes());
        record.push(b'\n');
    }
    record.extend_from_slice(b"data: ");
    record.extend_from_slice(event.payload());
    record.extend_from_slice(b"\n\n");
    record
}
