//! # Fan-in queue between producer schedulers and the stream writer.
//!
//! [`EventQueue`] is a thin wrapper around a bounded [`tokio::sync::mpsc`]
//! channel. The bound is deliberately small (depth 1 by default): a full
//! queue suspends the pushing scheduler until the writer drains it, which is
//! the engine's backpressure mechanism. The queue never drops an event.
//!
//! ## Rules
//! - **Blocking push**: `push` awaits while the queue is full.
//! - **Arrival order**: the writer observes events in push order, across all
//!   producers.
//! - **Closure**: the channel closes once every [`EventQueue`] handle is
//!   dropped; `pull` then drains the remainder and returns `None`.

use tokio::sync::mpsc;

use super::event::Event;

/// Producer-side handle of the fan-in queue.
///
/// Cheap to clone; each scheduling task owns one clone. The queue closes once
/// every handle has been dropped.
#[derive(Clone)]
pub struct EventQueue {
    tx: mpsc::Sender<Event>,
}

/// Consumer-side handle of the fan-in queue, owned by the stream writer.
pub struct EventDrain {
    rx: mpsc::Receiver<Event>,
}

impl EventQueue {
    /// Creates a bounded queue of the given depth (clamped to a minimum of 1).
    pub fn bounded(depth: usize) -> (EventQueue, EventDrain) {
        let (tx, rx) = mpsc::channel(depth.max(1));
        (EventQueue { tx }, EventDrain { rx })
    }

    /// Pushes one event, waiting while the queue is full.
    ///
    /// Returns the event back when the drain side is gone; the session is
    /// tearing down and the push can never complete.
    pub async fn push(&self, event: Event) -> Result<(), Event> {
        self.tx.send(event).await.map_err(|err| err.0)
    }
}

impl EventDrain {
    /// Receives the next event in arrival order.
    ///
    /// Returns `None` once every producer-side handle is dropped and the
    /// queue is empty. Cancel-safe: no event is lost when an enclosing
    /// `select!` takes another branch.
    pub async fn pull(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_push_suspends_while_full() {
        let (queue, mut drain) = EventQueue::bounded(1);
        queue.push(Event::unnamed(b"first".to_vec())).await.unwrap();

        // Depth 1: the second push must stay pending until the drain pulls.
        let second = queue.push(Event::unnamed(b"second".to_vec()));
        tokio::pin!(second);
        let blocked = tokio::time::timeout(Duration::from_millis(20), &mut second).await;
        assert!(blocked.is_err(), "push into a full queue should suspend");

        let first = drain.pull().await.expect("first event");
        assert_eq!(first.payload(), b"first");

        tokio::time::timeout(Duration::from_millis(100), &mut second)
            .await
            .expect("push should resume once the queue has room")
            .expect("push should succeed");
        let second = drain.pull().await.expect("second event");
        assert_eq!(second.payload(), b"second");
    }

    #[tokio::test]
    async fn test_pull_drains_remainder_then_returns_none() {
        let (queue, mut drain) = EventQueue::bounded(2);
        queue.push(Event::unnamed(b"only".to_vec())).await.unwrap();
        drop(queue);

        assert_eq!(drain.pull().await.expect("queued event").payload(), b"only");
        assert!(drain.pull().await.is_none(), "closed queue should end with None");
    }

    #[tokio::test]
    async fn test_push_hands_event_back_when_drain_dropped() {
        let (queue, drain) = EventQueue::bounded(1);
        drop(drain);

        let returned = queue.push(Event::named("navigation", b"{}".to_vec())).await;
        let event = returned.expect_err("push should fail without a drain");
        assert_eq!(event.name(), Some("navigation"));
        assert_eq!(event.payload(), b"{}");
    }

    #[tokio::test]
    async fn test_zero_depth_clamps_to_one() {
        let (queue, mut drain) = EventQueue::bounded(0);
        queue.push(Event::unnamed(Vec::new())).await.unwrap();
        assert!(drain.pull().await.is_some());
    }

    #[tokio::test]
    async fn test_arrival_order_across_handles() {
        let (queue, mut drain) = EventQueue::bounded(4);
        let other = queue.clone();

        queue.push(Event::unnamed(b"a".to_vec())).await.unwrap();
        other.push(Event::unnamed(b"b".to_vec())).await.unwrap();
        queue.push(Event::unnamed(b"c".to_vec())).await.unwrap();

        for expected in [b"a", b"b", b"c"] {
            assert_eq!(drain.pull().await.expect("event").payload(), expected);
        }
    }
}
