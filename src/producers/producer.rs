//! # Producer abstraction.
//!
//! A [`Producer`] synthesizes one [`Event`] on demand and declares its own
//! refresh interval. The engine drives each producer from a dedicated
//! scheduling task: an immediate first generation, then one generation per
//! interval tick. Generations of the same producer never overlap.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::ProduceError;
use crate::events::Event;

/// Shared reference to a producer (`Arc<dyn Producer>`).
pub type ProducerRef = Arc<dyn Producer>;

/// # A periodically-refreshing event source.
///
/// Implementations are queried repeatedly for fresh state. A failed
/// generation skips that cycle only; the schedule continues. Returning
/// [`ProduceError::Canceled`] terminates the producer's scheduling task.
///
/// ## Contract
/// - `generate` should watch `ctx` at coarse boundaries and return promptly
///   once the session is canceled.
/// - `interval` is queried once per cycle, after the generation completes.
///   [`Duration::ZERO`] is a sentinel: generate once, then stop.
///
/// # Example
/// ```
/// use std::time::Duration;
///
/// use async_trait::async_trait;
/// use tokio_util::sync::CancellationToken;
/// use feedcast::{Event, ProduceError, Producer};
///
/// struct Heartbeat;
///
/// #[async_trait]
/// impl Producer for Heartbeat {
///     fn name(&self) -> &str {
///         "heartbeat"
///     }
///
///     async fn generate(&self, ctx: CancellationToken) -> Result<Event, ProduceError> {
///         if ctx.is_cancelled() {
///             return Err(ProduceError::Canceled);
///         }
///         Ok(Event::unnamed(b"{}".to_vec()))
///     }
///
///     fn interval(&self) -> Duration {
///         Duration::from_secs(1)
///     }
/// }
/// ```
#[async_trait]
pub trait Producer: Send + Sync + 'static {
    /// Returns a stable, human-readable name for diagnostics.
    fn name(&self) -> &str;

    /// Synthesizes one event.
    ///
    /// On error no event is considered produced for this cycle.
    async fn generate(&self, ctx: CancellationToken) -> Result<Event, ProduceError>;

    /// Desired spacing between successive generations.
    ///
    /// [`Duration::ZERO`] means run once, then terminate the scheduling task.
    fn interval(&self) -> Duration;
}
