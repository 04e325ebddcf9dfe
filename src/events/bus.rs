//! Broadcast bus for session events
//!
//! Publishing is best-effort: with no subscribers the event is dropped, and a
//! subscriber that falls more than `capacity` events behind sees a lag error
//! on its next receive.

use tokio::sync::broadcast;

use super::types::SessionEvent;

#[derive(Debug, Clone)]
pub struct SessionEventBus {
    sender: broadcast::Sender<SessionEvent>,
}

impl SessionEventBus {
    /// Create a bus buffering up to `capacity` events per subscriber
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero (the config builder rejects that).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }

    /// Publish `event`, returning how many subscribers received it
    pub fn publish(&self, event: SessionEvent) -> usize {
        match self.sender.send(event) {
            Ok(receivers) => receivers,
            Err(broadcast::error::SendError(event)) => {
                tracing::trace!(?event, "No subscribers, event dropped");
                0
            }
        }
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::NodeId;
    use chrono::Utc;

    #[test]
    fn test_publish_without_subscribers_is_not_an_error() {
        let bus = SessionEventBus::new(4);
        let delivered = bus.publish(SessionEvent::RefreshStarted {
            node_id: NodeId::from("a"),
            timestamp: Utc::now(),
        });
        assert_eq!(delivered, 0);
    }

    #[tokio::test]
    async fn test_subscriber_receives_published_event() {
        let bus = SessionEventBus::new(4);
        let mut rx = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 1);

        bus.publish(SessionEvent::ForestCleared {
            removed_roots: 2,
            timestamp: Utc::now(),
        });

        match rx.recv().await.unwrap() {
            SessionEvent::ForestCleared { removed_roots, .. } => assert_eq!(removed_roots, 2),
            other => panic!("unexpected event {other:?}"),
        }
    }
}
