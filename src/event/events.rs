use serde::{Deserialize, Serialize};

use crate::duel::{Outcome, PlayerSlot, ScoreHistory};

/// Events published by the duel engine.
///
/// Events represent facts about things that have already happened. Each
/// carries everything an observer needs; none require a reply, so a slow
/// or absent subscriber can never block the turn loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DuelEvent {
    /// A run has started with the frozen configuration.
    DuelStarted {
        player1: String,
        player2: String,
        max_turns: u32,
    },

    /// Which player's growth was larger this turn, for audio cue dispatch.
    /// Ties route to Player2 (quirk inherited from the original table).
    ChipCue { louder: PlayerSlot },

    /// A turn fully committed; carries a snapshot of the whole history.
    TurnCommitted { history: ScoreHistory, turn: u32 },

    /// All turns completed - the end-of-game fanfare signal.
    GameEnd,

    /// Final classification of the run.
    DuelFinished { outcome: Outcome },

    /// Commentary text ready for display (service result or fallback).
    Commentary { text: String },

    /// The table was reset, via quit mid-run or a new deal.
    DuelReset,
}

impl DuelEvent {
    /// Get a human-readable description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            DuelEvent::DuelStarted { .. } => "duel_started",
            DuelEvent::ChipCue { .. } => "chip_cue",
            DuelEvent::TurnCommitted { .. } => "turn_committed",
            DuelEvent::GameEnd => "game_end",
            DuelEvent::DuelFinished { .. } => "duel_finished",
            DuelEvent::Commentary { .. } => "commentary",
            DuelEvent::DuelReset => "duel_reset",
        }
    }
}
