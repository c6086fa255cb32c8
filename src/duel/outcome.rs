use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Result classification for a finished duel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum Winner {
    Player1,
    Player2,
    Tie,
}

/// Derived from the final score point once a run finishes; never stored
/// in the history itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub winner: Winner,
    /// Whole-point gap between the finishers, for display.
    pub gap: u64,
}

/// Classifies the final scores. Pure and idempotent.
pub fn evaluate(final_p1: f64, final_p2: f64) -> Outcome {
    let winner = if final_p1 > final_p2 {
        Winner::Player1
    } else if final_p2 > final_p1 {
        Winner::Player2
    } else {
        Winner::Tie
    };

    Outcome {
        winner,
        gap: (final_p1 - final_p2).abs().floor() as u64,
    }
}
