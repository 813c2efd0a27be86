//! # Navigation producer.
//!
//! Rebuilds the client's navigation tree on a fixed five-second cadence.
//! Each generation queries every registered [`NavSource`] in registration
//! order, concatenates the returned sections, and emits the result as a
//! `"navigation"` event wrapped in a `{"sections": [...]}` envelope.
//!
//! One failing source aborts that cycle; the next tick retries all sources.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::error::ProduceError;
use crate::events::Event;
use crate::producers::producer::Producer;

/// Wire-level name of navigation events.
const NAVIGATION_EVENT: &str = "navigation";

/// Refresh cadence for navigation updates.
const NAVIGATION_EVERY: Duration = Duration::from_secs(5);

/// One entry in the navigation tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavSection {
    /// Display title.
    pub title: String,
    /// Resolvable path the entry links to.
    pub path: String,
    /// Child entries; omitted from the wire form when empty.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavSection>,
}

impl NavSection {
    /// Creates a leaf section.
    pub fn new(title: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            path: path.into(),
            children: Vec::new(),
        }
    }

    /// Appends a child entry.
    pub fn with_child(mut self, child: NavSection) -> Self {
        self.children.push(child);
        self
    }
}

/// A registered sub-system contributing entries to the navigation tree.
///
/// Queries are synchronous and expected to be cheap; anything slow belongs
/// behind the sub-system's own cache.
pub trait NavSource: Send + Sync + 'static {
    /// Returns this sub-system's sections for the given namespace.
    fn sections(&self, namespace: &str) -> Result<Vec<NavSection>, ProduceError>;
}

/// Wire envelope for navigation events.
#[derive(Serialize)]
struct NavigationEnvelope {
    sections: Vec<NavSection>,
}

/// Producer that rebuilds the navigation tree from all registered sources.
pub struct NavigationProducer {
    sources: Vec<Arc<dyn NavSource>>,
    namespace: String,
}

impl NavigationProducer {
    /// Creates a navigation producer over the given sub-systems.
    ///
    /// An empty source list is valid; the producer then emits an empty
    /// section list every cycle.
    pub fn new(sources: Vec<Arc<dyn NavSource>>, namespace: impl Into<String>) -> Self {
        Self {
            sources,
            namespace: namespace.into(),
        }
    }
}

#[async_trait]
impl Producer for NavigationProducer {
    fn name(&self) -> &str {
        NAVIGATION_EVENT
    }

    async fn generate(&self, ctx: CancellationToken) -> Result<Event, ProduceError> {
        let mut sections = Vec::new();
        for source in &self.sources {
            if ctx.is_cancelled() {
                return Err(ProduceError::Canceled);
            }
            sections.extend(source.sections(&self.namespace)?);
        }
        let payload = serde_json::to_vec(&NavigationEnvelope { sections })?;
        Ok(Event::named(NAVIGATION_EVENT, payload))
    }

    fn interval(&self) -> Duration {
        NAVIGATION_EVERY
    }
}
