//! Producer abstractions and the built-in producers.
//!
//! ## Contents
//! - [`Producer`]: trait for periodically-refreshing event sources
//! - [`ProducerRef`]: shared reference (`Arc<dyn Producer>`)
//! - [`ProducerFn`]: closure-backed producer
//! - [`ContentProducer`] / [`ContentRender`]: content panel republisher
//! - [`NavigationProducer`] / [`NavSource`] / [`NavSection`]: navigation tree

mod content;
mod navigation;
mod producer;
mod producer_fn;

pub use content::{ContentProducer, ContentRender};
pub use navigation::{NavSection, NavSource, NavigationProducer};
pub use producer::{Producer, ProducerRef};
pub use producer_fn::ProducerFn;
