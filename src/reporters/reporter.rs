//! # Reporter: the engine's diagnostics sink.
//!
//! Generation failures never abort a session; each one is handed to the
//! session's [`Report`] collaborator as a formatted message, then the
//! schedule moves on. The scheduling tasks call [`Report::report`] inline,
//! so implementations must be cheap and non-blocking. Anything expensive
//! belongs behind the implementation's own channel.

use std::sync::Arc;

/// Shared reference to a reporter (`Arc<dyn Report>`).
pub type ReporterRef = Arc<dyn Report>;

/// Fire-and-forget sink for engine diagnostics.
///
/// Called concurrently from every scheduling task in the session.
pub trait Report: Send + Sync + 'static {
    /// Records one message.
    fn report(&self, message: &str);
}
