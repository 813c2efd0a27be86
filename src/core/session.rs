//! # FeedSession: composition root for one client connection.
//!
//! A [`FeedSession`] owns everything one live-update stream needs: the
//! producer set, the fan-in queue configuration, the transport writer, and
//! the reporter. [`FeedSession::run`] wires them together and drives the
//! session until the client goes away or every run-once producer finishes.
//!
//! ## Lifecycle
//! ```text
//! FeedSession::run(token)
//!   ├─► validate: producers / writer / reporter present
//!   ├─► session = token.child_token()
//!   ├─► Aggregator::start(session)
//!   │       └─► one ProducerActor task per producer (child tokens)
//!   ├─► StreamWriter::stream(drain, session)      ◄── long-lived await
//!   │       ├─ exits on cancellation (disconnect, shutdown)
//!   │       ├─ exits on queue closure (all producers finished)
//!   │       └─ exits on transport failure
//!   ├─► session.cancel()      (unblocks actors stuck on push/sleep)
//!   ├─► join actors, bounded by cfg.grace
//!   └─► close the queue
//! ```
//!
//! The session token is a child of the caller's token: cancellation flows
//! inward (disconnect cancels the whole session), and the session's own
//! teardown never cancels the caller.
//!
//! ## Example
//! ```rust
//! use std::io;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use async_trait::async_trait;
//! use tokio_util::sync::CancellationToken;
//! use feedcast::{
//!     Event, FeedConfig, FeedSession, ProduceError, ProducerFn, ProducerRef, Report,
//!     ReporterRef, ResponseSink, StreamWriter,
//! };
//!
//! struct BufferSink(Vec<u8>);
//!
//! #[async_trait]
//! impl ResponseSink for BufferSink {
//!     fn supports_flush(&self) -> bool {
//!         true
//!     }
//!     fn insert_header(&mut self, _name: &str, _value: &str) {}
//!     async fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
//!         self.0.extend_from_slice(bytes);
//!         Ok(())
//!     }
//!     async fn flush(&mut self) -> io::Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! struct StderrReporter;
//!
//! impl Report for StderrReporter {
//!     fn report(&self, message: &str) {
//!         eprintln!("feed: {message}");
//!     }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), feedcast::FeedError> {
//!     let snapshot: ProducerRef = ProducerFn::arc(
//!         "snapshot",
//!         Duration::ZERO, // run once, then finish
//!         |_ctx: CancellationToken| async {
//!             Ok::<_, ProduceError>(Event::unnamed(br#"{"content":{}}"#.to_vec()))
//!         },
//!     );
//!     let reporter: ReporterRef = Arc::new(StderrReporter);
//!
//!     let session = FeedSession::builder(FeedConfig::default())
//!         .with_producer(snapshot)
//!         .with_writer(StreamWriter::new(BufferSink(Vec::new())))
//!         .with_reporter(reporter)
//!         .build();
//!
//!     // Only run-once producers: the session completes on its own. A live
//!     // deployment cancels the token on client disconnect instead.
//!     session.run(CancellationToken::new()).await
//! }
//! ```

use std::time::Duration;

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::core::{aggregator::Aggregator, config::FeedConfig};
use crate::error::FeedError;
use crate::producers::ProducerRef;
use crate::reporters::ReporterRef;
use crate::transport::StreamWriter;

/// Live-update engine instance bound to one client connection.
///
/// Build it with [`FeedSession::builder`], then consume it with
/// [`FeedSession::run`]. Sessions are single-use; one session per
/// connection.
pub struct FeedSession {
    cfg: FeedConfig,
    producers: Vec<ProducerRef>,
    writer: Option<StreamWriter>,
    reporter: Option<ReporterRef>,
}

/// Builder for a [`FeedSession`].
pub struct FeedSessionBuilder {
    cfg: FeedConfig,
    producers: Vec<ProducerRef>,
    writer: Option<StreamWriter>,
    reporter: Option<ReporterRef>,
}

impl FeedSession {
    /// Starts building a session with the given configuration.
    pub fn builder(cfg: FeedConfig) -> FeedSessionBuilder {
        FeedSessionBuilder {
            cfg,
            producers: Vec::new(),
            writer: None,
            reporter: None,
        }
    }

    /// Runs the session until cancellation, completion, or failure.
    ///
    /// Validates the wiring first: a session without producers, writer, or
    /// reporter fails immediately, before any task is spawned. After the
    /// writer exits the session token is canceled so no actor stays
    /// suspended on the queue, then the actors are joined within
    /// `cfg.grace`.
    ///
    /// The returned future is `Send`; a connection handler typically
    /// `tokio::spawn`s one session per client.
    ///
    /// ### Error precedence
    /// A transport failure is the session's primary error; a blown grace
    /// period is surfaced only when the stream itself ended cleanly.
    pub async fn run(mut self, token: CancellationToken) -> Result<(), FeedError> {
        if self.producers.is_empty() {
            return Err(FeedError::NoProducers);
        }
        let mut writer = self.writer.take().ok_or(FeedError::NoWriter)?;
        let reporter = self.reporter.take().ok_or(FeedError::NoReporter)?;

        let session = token.child_token();
        let producers = std::mem::take(&mut self.producers);
        let aggregator = Aggregator::new(producers, reporter, self.cfg.clone());
        let (mut drain, mut actors) = aggregator.start(&session);

        let streamed = writer.stream(&mut drain, &session).await;
        session.cancel();

        let joined = Self::wait_actors_with_grace(self.cfg.grace, &mut actors).await;
        drop(drain);

        streamed.map_err(FeedError::from)?;
        joined
    }

    /// Waits for every scheduling task to terminate within the grace period.
    ///
    /// An associated fn: `run` must not hold a shared borrow of the session
    /// across this await, or its future stops being `Send`.
    ///
    /// On timeout the stragglers are aborted and the session fails with
    /// [`FeedError::GraceExceeded`].
    async fn wait_actors_with_grace(
        grace: Duration,
        actors: &mut JoinSet<()>,
    ) -> Result<(), FeedError> {
        let done = async { while actors.join_next().await.is_some() {} };
        if tokio::time::timeout(grace, done).await.is_err() {
            let outstanding = actors.len();
            actors.abort_all();
            return Err(FeedError::GraceExceeded { grace, outstanding });
        }
        Ok(())
    }
}

impl FeedSessionBuilder {
    /// Adds one producer.
    pub fn with_producer(mut self, producer: ProducerRef) -> Self {
        self.producers.push(producer);
        self
    }

    /// Adds a batch of producers.
    pub fn with_producers(mut self, producers: impl IntoIterator<Item = ProducerRef>) -> Self {
        self.producers.extend(producers);
        self
    }

    /// Sets the transport writer.
    pub fn with_writer(mut self, writer: StreamWriter) -> Self {
        self.writer = Some(writer);
        self
    }

    /// Sets the reporter.
    pub fn with_reporter(mut self, reporter: ReporterRef) -> Self {
        self.reporter = Some(reporter);
        self
    }

    /// Finishes construction. Wiring is validated by [`FeedSession::run`],
    /// not here.
    pub fn build(self) -> FeedSession {
        FeedSession {
            cfg: self.cfg,
            producers: self.producers,
            writer: self.writer,
            reporter: self.reporter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use crate::error::ProduceError;
    use crate::events::Event;
    use crate::producers::ProducerFn;
    use crate::reporters::Report;
    use crate::transport::testing::MemorySink;

    struct QuietReporter;

    impl Report for QuietReporter {
        fn report(&self, _message: &str) {}
    }

    fn quiet() -> ReporterRef {
        Arc::new(QuietReporter)
    }

    fn once(tag: &'static str) -> ProducerRef {
        ProducerFn::arc(tag, Duration::ZERO, move |_ctx: CancellationToken| async move {
            Ok::<_, ProduceError>(Event::unnamed(tag.as_bytes().to_vec()))
        })
    }

    fn ticking(tag: &'static str, every: Duration) -> ProducerRef {
        let seq = Arc::new(AtomicUsize::new(0));
        ProducerFn::arc(tag, every, move |_ctx: CancellationToken| {
            let seq = Arc::clone(&seq);
            async move {
                let n = seq.fetch_add(1, Ordering::SeqCst);
                Ok::<_, ProduceError>(Event::unnamed(format!("{tag}-{n}").into_bytes()))
            }
        })
    }

    #[tokio::test]
    async fn test_missing_producers_fails_before_streaming() {
        let (sink, state) = MemorySink::streaming();
        let session = FeedSession::builder(FeedConfig::default())
            .with_writer(StreamWriter::new(sink))
            .with_reporter(quiet())
            .build();

        let err = session
            .run(CancellationToken::new())
            .await
            .expect_err("no producers configured");
        assert_eq!(err.as_label(), "config_no_producers");
        assert!(state.lock().unwrap().body.is_empty());
    }

    #[tokio::test]
    async fn test_missing_writer_fails_before_streaming() {
        let session = FeedSession::builder(FeedConfig::default())
            .with_producer(once("solo"))
            .with_reporter(quiet())
            .build();

        let err = session
            .run(CancellationToken::new())
            .await
            .expect_err("no writer configured");
        assert_eq!(err.as_label(), "config_no_writer");
    }

    #[tokio::test]
    async fn test_missing_reporter_fails_before_streaming() {
        let (sink, _state) = MemorySink::streaming();
        let session = FeedSession::builder(FeedConfig::default())
            .with_producer(once("solo"))
            .with_writer(StreamWriter::new(sink))
            .build();

        let err = session
            .run(CancellationToken::new())
            .await
            .expect_err("no reporter configured");
        assert_eq!(err.as_label(), "config_no_reporter");
    }

    #[tokio::test]
    async fn test_run_once_session_completes_without_cancellation() {
        let (sink, state) = MemorySink::streaming();
        let session = FeedSession::builder(FeedConfig::default())
            .with_producers([once("alpha"), once("beta")])
            .with_writer(StreamWriter::new(sink))
            .with_reporter(quiet())
            .build();

        tokio::time::timeout(Duration::from_secs(1), session.run(CancellationToken::new()))
            .await
            .expect("all-run-once session should finish by itself")
            .expect("clean completion");

        let state = state.lock().unwrap();
        let body = String::from_utf8(state.body.clone()).unwrap();
        assert!(body.contains("data: alpha\n\n"));
        assert!(body.contains("data: beta\n\n"));
        assert_eq!(state.headers.len(), 4, "stream headers set once");
    }

    #[tokio::test]
    async fn test_cancellation_ends_periodic_session_cleanly() {
        let (sink, state) = MemorySink::streaming();
        let session = FeedSession::builder(FeedConfig::default())
            .with_producer(ticking("tick", Duration::from_millis(5)))
            .with_writer(StreamWriter::new(sink))
            .with_reporter(quiet())
            .build();

        let token = CancellationToken::new();
        let handle = tokio::spawn(session.run(token.clone()));

        // Let a few records land before pulling the plug.
        loop {
            tokio::time::sleep(Duration::from_millis(5)).await;
            if state.lock().unwrap().body.len() > 20 {
                break;
            }
        }
        token.cancel();

        tokio::time::timeout(Duration::from_millis(500), handle)
            .await
            .expect("cancellation should end the session well inside grace")
            .expect("task join")
            .expect("clean shutdown");

        let body = String::from_utf8(state.lock().unwrap().body.clone()).unwrap();
        assert!(body.starts_with("data: tick-0\n\n"), "records arrive in producer order");
    }

    #[test]
    fn test_run_future_is_send() {
        fn require_send<T: Send>(_: &T) {}

        let (sink, _state) = MemorySink::streaming();
        let session = FeedSession::builder(FeedConfig::default())
            .with_producer(once("spawned"))
            .with_writer(StreamWriter::new(sink))
            .with_reporter(quiet())
            .build();

        // Spawning a session per connection requires a Send future.
        require_send(&session.run(CancellationToken::new()));
    }

    #[tokio::test]
    async fn test_unsupported_sink_cancels_schedulers() {
        let (sink, state) = MemorySink::buffered();
        let session = FeedSession::builder(FeedConfig::default())
            .with_producer(ticking("tick", Duration::from_millis(5)))
            .with_writer(StreamWriter::new(sink))
            .with_reporter(quiet())
            .build();

        let err = tokio::time::timeout(
            Duration::from_secs(1),
            session.run(CancellationToken::new()),
        )
        .await
        .expect("session must not hang on a rejected sink")
        .expect_err("buffered sink is rejected");
        assert_eq!(err.as_label(), "stream_flush_unsupported");

        let state = state.lock().unwrap();
        assert!(state.headers.is_empty(), "rejected sink gets no headers");
        assert!(state.body.is_empty(), "rejected sink gets no body bytes");
    }

    #[tokio::test]
    async fn test_stream_write_failure_surfaces_as_session_error() {
        let (sink, _state) = MemorySink::broken();
        let session = FeedSession::builder(FeedConfig::default())
            .with_producer(once("doomed"))
            .with_writer(StreamWriter::new(sink))
            .with_reporter(quiet())
            .build();

        let err = tokio::time::timeout(
            Duration::from_secs(1),
            session.run(CancellationToken::new()),
        )
        .await
        .expect("session must not hang on a broken sink")
        .expect_err("write failure ends the session");
        assert_eq!(err.as_label(), "stream_write_failed");
    }
}
