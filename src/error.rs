//! Error types used by the feedcast engine and producers.
//!
//! This module defines three error enums, one per propagation tier:
//!
//! - [`FeedError`]: errors raised by the session orchestration itself.
//! - [`ProduceError`]: errors raised by individual generation cycles.
//! - [`StreamError`]: errors raised by the transport writer.
//!
//! Producer errors stay inside their scheduling task (the cycle is skipped,
//! the schedule continues); stream errors are fatal and end the session.
//! All types provide helper methods (`as_label`, `as_message`) for
//! logging/metrics.

use std::time::Duration;
use thiserror::Error;

/// # Errors produced by the session orchestration.
///
/// Configuration problems are detected synchronously, before any scheduling
/// task is spawned. The remaining variants surface after the stream has
/// started.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum FeedError {
    /// No producer was registered for the session.
    #[error("no producers are configured")]
    NoProducers,

    /// No stream writer was attached to the session.
    #[error("no stream writer is configured")]
    NoWriter,

    /// No reporter was attached to the session.
    #[error("no reporter is configured")]
    NoReporter,

    /// Shutdown grace period was exceeded; some scheduling tasks remained
    /// stuck and had to be force-terminated.
    #[error("shutdown grace {grace:?} exceeded; {outstanding} scheduling task(s) aborted")]
    GraceExceeded {
        /// The configured grace duration.
        grace: Duration,
        /// Number of scheduling tasks that did not terminate in time.
        outstanding: usize,
    },

    /// The transport writer failed; see [`StreamError`].
    #[error(transparent)]
    Stream(#[from] StreamError),
}

impl FeedError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use feedcast::FeedError;
    ///
    /// assert_eq!(FeedError::NoProducers.as_label(), "config_no_producers");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            FeedError::NoProducers => "config_no_producers",
            FeedError::NoWriter => "config_no_writer",
            FeedError::NoReporter => "config_no_reporter",
            FeedError::GraceExceeded { .. } => "session_grace_exceeded",
            FeedError::Stream(err) => err.as_label(),
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            FeedError::GraceExceeded { grace, outstanding } => {
                format!("grace exceeded after {grace:?}; outstanding tasks={outstanding}")
            }
            FeedError::Stream(err) => err.as_message(),
            other => other.to_string(),
        }
    }
}

/// # Errors produced by one generation cycle.
///
/// A generation error never crosses its scheduling task: the failed cycle
/// pushes no event, the error is handed to the session reporter, and the
/// schedule moves on to the next tick. [`ProduceError::Canceled`] is the one
/// exception; it terminates the scheduling task.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ProduceError {
    /// The producer's collaborator call failed for this cycle.
    #[error("generation failed: {error}")]
    Failed {
        /// The underlying error message.
        error: String,
    },

    /// The generated payload could not be serialized.
    #[error("payload encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    /// Generation exceeded the configured per-cycle timeout.
    #[error("generation timed out after {timeout:?}")]
    Timeout {
        /// The timeout duration that was exceeded.
        timeout: Duration,
    },

    /// The cancellation token fired while the generation was in flight.
    #[error("generation canceled")]
    Canceled,
}

impl ProduceError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use feedcast::ProduceError;
    ///
    /// let err = ProduceError::Failed { error: "backend gone".into() };
    /// assert_eq!(err.as_label(), "produce_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ProduceError::Failed { .. } => "produce_failed",
            ProduceError::Encode(_) => "produce_encode",
            ProduceError::Timeout { .. } => "produce_timeout",
            ProduceError::Canceled => "produce_canceled",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ProduceError::Failed { error } => format!("error: {error}"),
            ProduceError::Encode(err) => format!("encoding: {err}"),
            ProduceError::Timeout { timeout } => format!("timeout: {timeout:?}"),
            ProduceError::Canceled => "canceled".to_string(),
        }
    }

    /// Indicates whether the owning schedule should skip this cycle and
    /// continue.
    ///
    /// Returns `true` for every variant except [`ProduceError::Canceled`],
    /// which terminates the scheduling task instead.
    ///
    /// # Example
    /// ```
    /// use feedcast::ProduceError;
    ///
    /// let skip = ProduceError::Failed { error: "boom".into() };
    /// assert!(skip.is_cycle_skip());
    /// assert!(!ProduceError::Canceled.is_cycle_skip());
    /// ```
    pub fn is_cycle_skip(&self) -> bool {
        !matches!(self, ProduceError::Canceled)
    }
}

/// # Errors produced by the transport writer.
///
/// Both variants are fatal to the streaming session. The distinction matters
/// to the surrounding HTTP handler: [`StreamError::FlushUnsupported`] is
/// detected before any byte reaches the client, so the handler can still
/// answer with a plain error response.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum StreamError {
    /// The response sink cannot deliver body bytes incrementally; live
    /// streaming is impossible. No headers or body bytes were written.
    #[error("response sink does not support flushing; streaming unavailable")]
    FlushUnsupported,

    /// Writing or flushing a record failed mid-stream.
    #[error("stream write failed: {0}")]
    Write(#[from] std::io::Error),
}

impl StreamError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use feedcast::StreamError;
    ///
    /// assert_eq!(StreamError::FlushUnsupported.as_label(), "stream_flush_unsupported");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            StreamError::FlushUnsupported => "stream_flush_unsupported",
            StreamError::Write(_) => "stream_write_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            StreamError::FlushUnsupported => "sink does not support flushing".to_string(),
            StreamError::Write(err) => format!("write failed: {err}"),
        }
    }

    /// Returns the HTTP status the surrounding handler should answer with
    /// when streaming never started: `503` for a sink without flush support,
    /// `500` otherwise.
    ///
    /// # Example
    /// ```
    /// use feedcast::StreamError;
    ///
    /// assert_eq!(StreamError::FlushUnsupported.http_status(), 503);
    /// ```
    pub fn http_status(&self) -> u16 {
        match self {
            StreamError::FlushUnsupported => 503,
            StreamError::Write(_) => 500,
        }
    }
}
