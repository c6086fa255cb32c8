// Event-driven boundary between the engine and its collaborators
// (presentation, audio cues, commentary display).

pub use bus::EventBus;
pub use events::DuelEvent;
pub use subscription::{spawn_subscriber, DuelSubscriber};

mod bus;
mod events;
mod subscription;
