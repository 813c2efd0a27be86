//! # Aggregator: fans every producer into one bounded queue.
//!
//! Owns the producer set of one session. [`Aggregator::start`] spawns one
//! [`ProducerActor`] per producer, each on its own child token, and hands
//! every actor a clone of the queue's producer side. The local clone is
//! dropped before returning, so the channel closes exactly when the last
//! actor terminates; queue closure is the writer's signal that no task can
//! push again.

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::core::actor::ProducerActor;
use crate::core::config::FeedConfig;
use crate::events::{EventDrain, EventQueue};
use crate::producers::ProducerRef;
use crate::reporters::ReporterRef;

/// Aggregation stage of one session: the fixed producer set plus the wiring
/// needed to run it.
pub(crate) struct Aggregator {
    producers: Vec<ProducerRef>,
    reporter: ReporterRef,
    cfg: FeedConfig,
}

impl Aggregator {
    /// Creates the aggregation stage. The producer set is fixed for the
    /// session's lifetime.
    pub(crate) fn new(producers: Vec<ProducerRef>, reporter: ReporterRef, cfg: FeedConfig) -> Self {
        Self {
            producers,
            reporter,
            cfg,
        }
    }

    /// Spawns one scheduling task per producer.
    ///
    /// Returns the consumer side of the fan-in queue plus the join set
    /// tracking the spawned tasks.
    pub(crate) fn start(&self, token: &CancellationToken) -> (EventDrain, JoinSet<()>) {
        let (queue, drain) = EventQueue::bounded(self.cfg.queue_depth_clamped());
        let mut actors = JoinSet::new();
        for producer in &self.producers {
            let actor = ProducerActor::new(
                producer.clone(),
                queue.clone(),
                self.reporter.clone(),
                self.cfg.generation_timeout(),
            );
            actors.spawn(actor.run(token.child_token()));
        }
        (drain, actors)
    }
}
