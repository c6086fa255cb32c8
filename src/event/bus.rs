use tokio::sync::broadcast;
use tracing::debug;

use super::events::DuelEvent;

/// Capacity of the broadcast channel. A full run emits at most a few
/// hundred events; lagging subscribers drop the oldest, never the engine.
const CHANNEL_CAPACITY: usize = 256;

/// Event bus for distributing duel events to observers.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<DuelEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Publishes an event to all current subscribers. Publishing with no
    /// subscribers is fine - the engine never depends on being observed.
    pub fn publish(&self, event: DuelEvent) {
        let event_type = event.event_type();
        match self.sender.send(event) {
            Ok(receiver_count) => {
                debug!(
                    event = event_type,
                    receivers = receiver_count,
                    "Duel event published"
                );
            }
            Err(_) => {
                debug!(event = event_type, "Duel event published with no receivers");
            }
        }
    }

    /// Subscribe to all duel events from this point on.
    pub fn subscribe(&self) -> broadcast::Receiver<DuelEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscriber_receives_published_event() {
        let bus = EventBus::new();
        let mut receiver = bus.subscribe();

        bus.publish(DuelEvent::GameEnd);

        let event = receiver.recv().await.unwrap();
        assert_eq!(event.event_type(), "game_end");
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_does_not_panic() {
        let bus = EventBus::new();
        bus.publish(DuelEvent::DuelReset);
    }

    #[tokio::test]
    async fn test_multiple_subscribers_all_receive() {
        let bus = EventBus::new();
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();

        bus.publish(DuelEvent::GameEnd);

        assert_eq!(first.recv().await.unwrap().event_type(), "game_end");
        assert_eq!(second.recv().await.unwrap().event_type(), "game_end");
    }
}
