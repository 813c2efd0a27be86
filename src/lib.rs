//! # feedcast
//!
//! **Feedcast** is a live-update feed engine for Rust.
//!
//! It runs several independent, periodically-refreshing producers in
//! parallel, merges their events into one ordered stream, and delivers that
//! stream to a long-lived client connection over text/event-stream framing.
//! A client UI stays synchronized with backend state without polling.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!  ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!  │   Producer   │   │   Producer   │   │   Producer   │
//!  │  (content)   │   │ (navigation) │   │ (ProducerFn) │
//!  └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!         ▼                  ▼                  ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │  one ProducerActor task per producer                    │
//! │  - immediate first generation, then interval ticks      │
//! │  - failed cycles go to the Report sink and are skipped  │
//! └───────────────────────────┬─────────────────────────────┘
//!                             ▼
//!              EventQueue (bounded, depth 1 by default)
//!              full queue = backpressure, never loss
//!                             ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │  StreamWriter                                           │
//! │  - capability check, then headers exactly once          │
//! │  - `event:` / `data:` records, one flush per record     │
//! └───────────────────────────┬─────────────────────────────┘
//!                             ▼
//!                 ResponseSink (the HTTP layer)
//! ```
//!
//! ### Lifecycle
//! ```text
//! FeedSession::run(token)
//!   ├─► validate wiring (producers, writer, reporter)
//!   ├─► spawn one scheduling task per producer (child tokens)
//!   ├─► stream records until:
//!   │     - token is canceled (client disconnect, shutdown), or
//!   │     - the queue closes (every run-once producer finished), or
//!   │     - the transport fails
//!   ├─► cancel the session token (unblocks suspended schedulers)
//!   └─► join the schedulers within FeedConfig::grace
//! ```
//!
//! ## Features
//! | Area           | Description                                                  | Key types / traits                          |
//! |----------------|--------------------------------------------------------------|---------------------------------------------|
//! | **Producers**  | Periodic event sources: bring your own or use the built-ins. | [`Producer`], [`ProducerFn`], [`ContentProducer`], [`NavigationProducer`] |
//! | **Aggregation**| Bounded fan-in with backpressure and stable arrival order.   | [`EventQueue`], [`EventDrain`]              |
//! | **Transport**  | Push-protocol framing over any streamable response.          | [`StreamWriter`], [`ResponseSink`]          |
//! | **Sessions**   | Per-connection orchestration and graceful teardown.          | [`FeedSession`], [`FeedConfig`]             |
//! | **Errors**     | Typed errors per propagation tier.                           | [`FeedError`], [`ProduceError`], [`StreamError`] |
//! | **Reporting**  | Fire-and-forget diagnostics for skipped cycles.              | [`Report`]                                  |
//!
//! ## Optional features
//! - `logging`: exports [`TracingReporter`], a reporter backed by `tracing`
//!   _(enabled by default)_.
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
//! // Adapt whatever response type the server exposes. This one just
//! // collects the body in memory.
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
//!     // A run-once producer: a zero interval generates a single event.
//!     let greeting: ProducerRef = ProducerFn::arc(
//!         "greeting",
//!         Duration::ZERO,
//!         |_ctx: CancellationToken| async {
//!             Ok::<_, ProduceError>(Event::named("greeting", br#"{"msg":"hi"}"#.to_vec()))
//!         },
//!     );
//!     let reporter: ReporterRef = Arc::new(StderrReporter);
//!
//!     let session = FeedSession::builder(FeedConfig::default())
//!         .with_producer(greeting)
//!         .with_writer(StreamWriter::new(BufferSink(Vec::new())))
//!         .with_reporter(reporter)
//!         .build();
//!
//!     // Only run-once producers here, so the session completes on its own.
//!     // A live deployment keeps periodic producers running and cancels the
//!     // token when the client disconnects.
//!     session.run(CancellationToken::new()).await
//! }
//! ```
mod core;
mod error;
mod events;
mod producers;
mod reporters;
mod transport;

// ---- Public re-exports ----

pub use core::{FeedConfig, FeedSession, FeedSessionBuilder};
pub use error::{FeedError, ProduceError, StreamError};
pub use events::{Event, EventDrain, EventQueue};
pub use producers::{
    ContentProducer, ContentRender, NavSection, NavSource, NavigationProducer, Producer,
    ProducerFn, ProducerRef,
};
pub use reporters::{Report, ReporterRef};
pub use transport::{ResponseSink, StreamWriter, EVENT_STREAM_HEADERS};

// Optional: expose the built-in `tracing`-backed reporter.
// Enable with: `--features logging` (on by default)
#[cfg(feature = "logging")]
pub use reporters::TracingReporter;
