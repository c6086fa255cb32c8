// Library crate for the Bada number duel engine
// This file exposes the public API for integration tests

pub mod commentary;
pub mod duel;
pub mod event;
pub mod shared;

// Re-export commonly used types for easier access in tests
pub use commentary::{CommentaryRequest, CommentaryService, HouseCommentary, FALLBACK_COMMENTARY};
pub use duel::{
    evaluate, turn_growth, DuelEngine, Outcome, PlayerConfig, PlayerSlot, RandomSource, RunConfig,
    RunStatus, ScoreHistory, ScorePoint, ThreadRandom, Winner,
};
pub use event::{DuelEvent, DuelSubscriber, EventBus};
pub use shared::DuelError;
