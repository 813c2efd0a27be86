//! Reporting collaborators.
//!
//! ## Contents
//! - [`Report`]: trait for the session's diagnostics sink
//! - [`ReporterRef`]: shared reference (`Arc<dyn Report>`)
//! - [`TracingReporter`]: built-in `tracing` bridge (feature `logging`)

#[cfg(feature = "logging")]
mod log;
mod reporter;

#[cfg(feature = "logging")]
pub use log::TracingReporter;
pub use reporter::{Report, ReporterRef};
