//! # Closure-backed producer (`ProducerFn`).
//!
//! [`ProducerFn`] wraps a closure `F: Fn(CancellationToken) -> Future`;
//! every cycle calls the closure to obtain a fresh generation future. The
//! closure itself is immutable; when state must survive across cycles,
//! capture an `Arc<...>` explicitly.

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::ProduceError;
use crate::events::Event;
use crate::producers::producer::Producer;

/// Closure-backed [`Producer`] implementation.
///
/// ## Example
/// ```
/// use std::time::Duration;
///
/// use tokio_util::sync::CancellationToken;
/// use feedcast::{Event, ProduceError, Producer, ProducerFn, ProducerRef};
///
/// let ticker: ProducerRef = ProducerFn::arc(
///     "ticker",
///     Duration::from_secs(1),
///     |_ctx: CancellationToken| async {
///         Ok::<_, ProduceError>(Event::unnamed(b"{}".to_vec()))
///     },
/// );
///
/// assert_eq!(ticker.name(), "ticker");
/// assert_eq!(ticker.interval(), Duration::from_secs(1));
/// ```
#[derive(Debug)]
pub struct ProducerFn<F> {
    name: Cow<'static, str>,
    every: Duration,
    f: F,
}

impl<F> ProducerFn<F> {
    /// Creates a closure-backed producer with a fixed refresh interval.
    ///
    /// `Duration::ZERO` means generate once, then stop.
    pub fn new(name: impl Into<Cow<'static, str>>, every: Duration, f: F) -> Self {
        Self {
            name: name.into(),
            every,
            f,
        }
    }

    /// Creates the producer and returns it as a shared reference.
    pub fn arc(name: impl Into<Cow<'static, str>>, every: Duration, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, every, f))
    }
}

#[async_trait]
impl<F, Fut> Producer for ProducerFn<F>
where
    F: Fn(CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Event, ProduceError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, ctx: CancellationToken) -> Result<Event, ProduceError> {
        (self.f)(ctx).await
    }

    fn interval(&self) -> Duration {
        self.every
    }
}
