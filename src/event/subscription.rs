use async_trait::async_trait;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::{bus::EventBus, events::DuelEvent};

/// An observer of duel events: audio cue adapters, presentation bridges,
/// loggers. Handlers must not block; the forwarding task delivers events
/// one at a time per subscriber.
#[async_trait]
pub trait DuelSubscriber: Send + Sync {
    fn subscriber_name(&self) -> &'static str;

    async fn handle_event(&self, event: DuelEvent);
}

/// Spawns a background task that forwards bus events to the subscriber
/// until the bus is dropped.
pub fn spawn_subscriber(event_bus: &EventBus, subscriber: Arc<dyn DuelSubscriber>) -> JoinHandle<()> {
    let name = subscriber.subscriber_name();
    let mut receiver = event_bus.subscribe();

    info!(subscriber = name, "Starting duel event subscription");

    tokio::spawn(async move {
        while let Ok(event) = receiver.recv().await {
            subscriber.handle_event(event).await;
        }

        warn!(subscriber = name, "Duel subscription ended - no more events");
    })
}
