//! # ProducerActor: one producer's scheduling loop.
//!
//! Drives a single [`Producer`] at its own cadence, independent of every
//! other producer in the session.
//!
//! ## Architecture
//! ```text
//! Aggregator ──► ProducerActor::run()
//!
//! loop {
//!   ├─► generate (immediate on start; optional per-cycle timeout)
//!   │     ├─ Ok(event)      ─► push onto the queue (suspends while full)
//!   │     ├─ Err(Canceled)  ─► break
//!   │     └─ Err(other)     ─► report, skip the push
//!   ├─► interval() == 0     ─► break (run-once producer)
//!   └─► sleep(interval), then next cycle
//! }
//! ```
//!
//! ## Rules
//! - Cycles run **sequentially**; a producer never overlaps itself.
//! - Cancellation is honored at every suspension point: generation (via a
//!   per-cycle child token), queue push, and interval sleep.
//! - A failed generation skips that cycle only; the schedule continues.

use std::time::Duration;

use tokio::{select, time};
use tokio_util::sync::CancellationToken;

use crate::error::ProduceError;
use crate::events::{Event, EventQueue};
use crate::producers::ProducerRef;
use crate::reporters::ReporterRef;

/// Scheduling loop for one producer.
pub(crate) struct ProducerActor {
    /// Producer to drive.
    producer: ProducerRef,
    /// Producer-side handle of the session's fan-in queue.
    queue: EventQueue,
    /// Sink for skipped-cycle diagnostics.
    reporter: ReporterRef,
    /// Optional per-cycle generation cap (`None` = no cap).
    generate_timeout: Option<Duration>,
}

impl ProducerActor {
    /// Creates a new scheduling actor.
    pub(crate) fn new(
        producer: ProducerRef,
        queue: EventQueue,
        reporter: ReporterRef,
        generate_timeout: Option<Duration>,
    ) -> Self {
        Self {
            producer,
            queue,
            reporter,
            generate_timeout,
        }
    }

    /// Runs the loop until the producer finishes or the session is canceled.
    ///
    /// ### Exit conditions
    /// - `token` is cancelled (client disconnect or shutdown)
    /// - the producer reports a zero interval (run-once)
    /// - the producer returns [`ProduceError::Canceled`]
    /// - the drain side of the queue is gone (session teardown)
    pub(crate) async fn run(self, token: CancellationToken) {
        loop {
            if token.is_cancelled() {
                break;
            }

            match self.generate_once(&token).await {
                Ok(event) => {
                    let delivered = select! {
                        pushed = self.queue.push(event) => pushed.is_ok(),
                        _ = token.cancelled() => break,
                    };
                    if !delivered {
                        break;
                    }
                }
                Err(err) if err.is_cycle_skip() => {
                    self.reporter.report(&format!(
                        "producer {} skipped a cycle: {}",
                        self.producer.name(),
                        err.as_message()
                    ));
                }
                Err(_) => break,
            }

            let every = self.producer.interval();
            if every.is_zero() {
                break;
            }
            let sleep = time::sleep(every);
            tokio::pin!(sleep);
            select! {
                _ = &mut sleep => {}
                _ = token.cancelled() => break,
            }
        }
    }

    /// Executes one generation under a per-cycle child token and the
    /// configured cap.
    ///
    /// An elapsed cap cancels the child token so the abandoned generation
    /// future's collaborators stop early, then fails the cycle with
    /// [`ProduceError::Timeout`].
    async fn generate_once(&self, token: &CancellationToken) -> Result<Event, ProduceError> {
        let cycle = token.child_token();
        match self.generate_timeout {
            Some(cap) => match time::timeout(cap, self.producer.generate(cycle.clone())).await {
                Ok(res) => res,
                Err(_elapsed) => {
                    cycle.cancel();
                    Err(ProduceError::Timeout { timeout: cap })
                }
            },
            None => self.producer.generate(cycle).await,
        }
    }
}
