//! # Response sink: the boundary to the HTTP layer.
//!
//! The engine never touches a server framework directly. The surrounding
//! application wraps its open response in a [`ResponseSink`] and hands it to
//! the [`StreamWriter`](crate::StreamWriter); anything able to set headers,
//! append body bytes, and push them to the client incrementally can carry a
//! feed session.

use std::io;

use async_trait::async_trait;

/// Response headers set once, before the first body byte.
pub const EVENT_STREAM_HEADERS: [(&str, &str); 4] = [
    ("Content-Type", "text/event-stream"),
    ("Cache-Control", "no-cache"),
    ("Connection", "keep-alive"),
    ("Access-Control-Allow-Origin", "*"),
];

/// An open, streaming-capable HTTP response.
///
/// `supports_flush` is a capability probe: a response that buffers the whole
/// body cannot carry a live feed, and the writer rejects it before writing
/// anything. Header insertion is infallible here; sinks whose header phase
/// can fail should surface that on the first `write_all` instead.
#[async_trait]
pub trait ResponseSink: Send {
    /// True when `flush` delivers buffered bytes to the client immediately.
    fn supports_flush(&self) -> bool;

    /// Sets one response header. Called before the first `write_all`.
    fn insert_header(&mut self, name: &str, value: &str);

    /// Appends bytes to the response body.
    async fn write_all(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Pushes buffered body bytes to the client.
    async fn flush(&mut self) -> io::Result<()>;
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory sink shared by the transport and session tests.

    use std::io;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::ResponseSink;

    /// Everything a [`MemorySink`] observed, inspectable after the writer
    /// has consumed the sink.
    #[derive(Default)]
    pub(crate) struct SinkState {
        pub(crate) headers: Vec<(String, String)>,
        pub(crate) body: Vec<u8>,
        pub(crate) flushes: usize,
        pub(crate) header_after_body: bool,
    }

    pub(crate) struct MemorySink {
        flushable: bool,
        fail_writes: bool,
        state: Arc<Mutex<SinkState>>,
    }

    impl MemorySink {
        /// A sink that supports incremental delivery.
        pub(crate) fn streaming() -> (Self, Arc<Mutex<SinkState>>) {
            let state = Arc::new(Mutex::new(SinkState::default()));
            let sink = MemorySink {
                flushable: true,
                fail_writes: false,
                state: Arc::clone(&state),
            };
            (sink, state)
        }

        /// A sink that buffers the whole body (no flush support).
        pub(crate) fn buffered() -> (Self, Arc<Mutex<SinkState>>) {
            let state = Arc::new(Mutex::new(SinkState::default()));
            let sink = MemorySink {
                flushable: false,
                fail_writes: false,
                state: Arc::clone(&state),
            };
            (sink, state)
        }

        /// A flush-capable sink whose writes fail, as after a client
        /// disconnect.
        pub(crate) fn broken() -> (Self, Arc<Mutex<SinkState>>) {
            let state = Arc::new(Mutex::new(SinkState::default()));
            let sink = MemorySink {
                flushable: true,
                fail_writes: true,
                state: Arc::clone(&state),
            };
            (sink, state)
        }
    }

    #[async_trait]
    impl ResponseSink for MemorySink {
        fn supports_flush(&self) -> bool {
            self.flushable
        }

        fn insert_header(&mut self, name: &str, value: &str) {
            let mut state = self.state.lock().unwrap();
            if !state.body.is_empty() {
                state.header_after_body = true;
            }
            state.headers.push((name.to_string(), value.to_string()));
        }

        async fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
            if self.fail_writes {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "peer closed"));
            }
            self.state.lock().unwrap().body.extend_from_slice(bytes);
            Ok(())
        }

        async fn flush(&mut self) -> io::Result<()> {
            self.state.lock().unwrap().flushes += 1;
            Ok(())
        }
    }
}
