//! # Built-in reporter that forwards diagnostics to `tracing`.
//!
//! [`TracingReporter`] emits every reported message as a `tracing` error
//! event. This is the right default wherever the application already
//! installs a `tracing` subscriber.
//!
//! ## Example
//! ```no_run
//! # use std::sync::Arc;
//! # use feedcast::{ReporterRef, TracingReporter};
//! let reporter: ReporterRef = Arc::new(TracingReporter);
//! ```

use tracing::error;

use crate::reporters::reporter::Report;

/// Reporter backed by the `tracing` ecosystem.
///
/// Enabled via the `logging` feature. Implement [`Report`] directly for
/// custom sinks such as metrics counters or ring buffers.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingReporter;

impl Report for TracingReporter {
    fn report(&self, message: &str) {
        error!("{}", message);
    }
}
