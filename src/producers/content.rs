//! # Content producer.
//!
//! Republishes a rendered content panel on a fixed cadence. Each generation
//! renders the panel for one `(path, prefix, namespace)` triple, wraps the
//! result in a `{"content": ...}` envelope, and emits it as an unnamed
//! event. The rendering itself lives behind [`ContentRender`]; the engine
//! treats the returned JSON as opaque.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::error::ProduceError;
use crate::events::Event;
use crate::producers::producer::Producer;

/// Renders one content panel.
///
/// Implementations hold the application's view logic (backend queries,
/// templating). A rendering failure fails that cycle only.
#[async_trait]
pub trait ContentRender: Send + Sync + 'static {
    /// Renders the current content for `path` under `prefix` within
    /// `namespace`.
    async fn render(
        &self,
        ctx: CancellationToken,
        path: &str,
        prefix: &str,
        namespace: &str,
    ) -> Result<Value, ProduceError>;
}

/// Wire envelope for content events.
#[derive(Serialize)]
struct ContentEnvelope {
    content: Value,
}

/// Producer that republishes rendered content as unnamed events.
pub struct ContentProducer {
    render: Arc<dyn ContentRender>,
    path: String,
    prefix: String,
    namespace: String,
    every: Duration,
}

impl ContentProducer {
    /// Creates a content producer.
    ///
    /// `every` is the refresh cadence; `Duration::ZERO` renders once and
    /// stops.
    pub fn new(
        render: Arc<dyn ContentRender>,
        path: impl Into<String>,
        prefix: impl Into<String>,
        namespace: impl Into<String>,
        every: Duration,
    ) -> Self {
        Self {
            render,
            path: path.into(),
            prefix: prefix.into(),
            namespace: namespace.into(),
            every,
        }
    }
}

#[async_trait]
impl Producer for ContentProducer {
    fn name(&self) -> &str {
        "content"
    }

    async fn generate(&self, ctx: CancellationToken) -> Result<Event, ProduceError> {
        let content = self
            .render
            .render(ctx, &self.path, &self.prefix, &self.namespace)
            .await?;
        let payload = serde_json::to_vec(&ContentEnvelope { content })?;
        Ok(Event::unnamed(payload))
    }

    fn interval(&self) -> Duration {
        self.every
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct FixedRender(Value);

    #[async_trait]
    impl ContentRender for FixedRender {
        async fn render(
            &self,
            _ctx: CancellationToken,
            _path: &str,
            _prefix: &str,
            _namespace: &str,
        ) -> Result<Value, ProduceError> {
            Ok(self.0.clone())
        }
    }

    struct EchoRender;

    #[async_trait]
    impl ContentRender for EchoRender {
        async fn render(
            &self,
            _ctx: CancellationToken,
            path: &str,
            prefix: &str,
            namespace: &str,
        ) -> Result<Value, ProduceError> {
            Ok(json!(format!("{prefix}/{namespace}/{path}")))
        }
    }

    struct FailingRender;

    #[async_trait]
    impl ContentRender for FailingRender {
        async fn render(
            &self,
            _ctx: CancellationToken,
            _path: &str,
            _prefix: &str,
            _namespace: &str,
        ) -> Result<Value, ProduceError> {
            Err(ProduceError::Failed {
                error: "backend unavailable".into(),
            })
        }
    }

    #[tokio::test]
    async fn test_generate_wraps_payload_in_content_envelope() {
        let producer = ContentProducer::new(
            Arc::new(FixedRender(json!({"title": "workloads"}))),
            "overview",
            "/api/v1",
            "default",
            Duration::from_secs(1),
        );

        let event = producer
            .generate(CancellationToken::new())
            .await
            .expect("generation should succeed");
        assert!(event.name().is_none(), "content events use the unnamed type");
        assert_eq!(event.payload(), br#"{"content":{"title":"workloads"}}"#);
    }

    #[tokio::test]
    async fn test_generate_forwards_request_context() {
        let producer = ContentProducer::new(
            Arc::new(EchoRender),
            "pods",
            "/api/v1",
            "kube-system",
            Duration::ZERO,
        );

        let event = producer
            .generate(CancellationToken::new())
            .await
            .expect("generation should succeed");
        assert_eq!(event.payload(), br#"{"content":"/api/v1/kube-system/pods"}"#);
    }

    #[tokio::test]
    async fn test_render_error_produces_no_event() {
        let producer = ContentProducer::new(
            Arc::new(FailingRender),
            "overview",
            "/api/v1",
            "default",
            Duration::from_secs(1),
        );

        let err = producer
            .generate(CancellationToken::new())
            .await
            .expect_err("failed rendering should fail the cycle");
        assert_eq!(err.as_label(), "produce_failed");
        assert!(err.is_cycle_skip(), "a render failure skips the cycle only");
    }

    #[tokio::test]
    async fn test_interval_reports_configured_cadence() {
        let render: Arc<dyn ContentRender> = Arc::new(EchoRender);
        let periodic =
            ContentProducer::new(render.clone(), "p", "/", "ns", Duration::from_secs(5));
        assert_eq!(periodic.interval(), Duration::from_secs(5));
        assert_eq!(periodic.name(), "content");

        let once = ContentProducer::new(render, "p", "/", "ns", Duration::ZERO);
        assert!(once.interval().is_zero(), "zero interval marks a run-once producer");
    }
}
