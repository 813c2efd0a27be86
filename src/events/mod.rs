//! Event data model and the fan-in queue.
//!
//! ## Contents
//! - [`Event`]: one unit of pushed data (optional name + payload)
//! - [`EventQueue`] / [`EventDrain`]: bounded channel between the producer
//!   schedulers and the stream writer

mod event;
mod queue;

pub use event::Event;
pub use queue::{EventDrain, EventQueue};
