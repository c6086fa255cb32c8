// Core simulation: score model, growth law, outcome evaluation and the
// engine that drives the async turn loop.

pub use config::{PlayerConfig, RunConfig, MAX_TURNS, MAX_WEIGHT, MIN_TURNS, MIN_WEIGHT};
pub use engine::{DuelEngine, RunStatus, TURN_DELAY};
pub use growth::{apply_growth, turn_growth, RandomSource, ThreadRandom, TurnGrowth};
pub use outcome::{evaluate, Outcome, Winner};
pub use score::{PlayerSlot, ScoreHistory, ScorePoint};

mod config;
mod engine;
mod growth;
mod outcome;
mod score;
