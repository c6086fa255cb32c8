use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::shared::DuelError;

/// Identifies one of the two contenders at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter)]
pub enum PlayerSlot {
    Player1,
    Player2,
}

/// One committed turn: both players' running totals after the turn resolved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScorePoint {
    pub turn: u32,
    pub player1_value: f64,
    pub player2_value: f64,
}

impl ScorePoint {
    pub fn new(turn: u32, player1_value: f64, player2_value: f64) -> Self {
        Self {
            turn,
            player1_value,
            player2_value,
        }
    }

    /// The fixed origin every history starts from.
    pub fn zero() -> Self {
        Self::new(0, 0.0, 0.0)
    }

    pub fn value_for(&self, slot: PlayerSlot) -> f64 {
        match slot {
            PlayerSlot::Player1 => self.player1_value,
            PlayerSlot::Player2 => self.player2_value,
        }
    }
}

/// Append-only record of a run. Always contains at least the zero point;
/// `append` hands back a new history so snapshots already given to
/// observers never change underneath them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreHistory {
    points: Vec<ScorePoint>,
}

impl ScoreHistory {
    pub fn new() -> Self {
        Self {
            points: vec![ScorePoint::zero()],
        }
    }

    /// A fresh history holding only the zero point.
    pub fn reset() -> Self {
        Self::new()
    }

    pub fn append(&self, point: ScorePoint) -> Self {
        let mut points = self.points.clone();
        points.push(point);
        Self { points }
    }

    /// The most recently committed point. `EmptyHistory` is only reachable
    /// if the "never legitimately empty" invariant has been violated.
    pub fn latest(&self) -> Result<&ScorePoint, DuelError> {
        self.points.last().ok_or(DuelError::EmptyHistory)
    }

    pub fn points(&self) -> &[ScorePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl Default for ScoreHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_history_holds_only_zero_point() {
        let history = ScoreHistory::new();
        assert_eq!(history.len(), 1);
        assert_eq!(*history.latest().unwrap(), ScorePoint::zero());
    }

    #[test]
    fn test_append_then_latest_round_trip() {
        let history = ScoreHistory::new();
        let point = ScorePoint::new(1, 42.0, 17.5);
        let updated = history.append(point);

        assert_eq!(*updated.latest().unwrap(), point);
        assert_eq!(updated.len(), 2);
    }

    #[test]
    fn test_append_does_not_mutate_prior_snapshot() {
        let snapshot = ScoreHistory::new();
        let updated = snapshot.append(ScorePoint::new(1, 10.0, 20.0));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(updated.len(), 2);
    }

    #[test]
    fn test_reset_discards_accumulated_points() {
        let history = ScoreHistory::new()
            .append(ScorePoint::new(1, 35.0, 35.0))
            .append(ScorePoint::new(2, 80.0, 70.0));
        assert_eq!(history.len(), 3);

        let fresh = ScoreHistory::reset();
        assert_eq!(fresh.len(), 1);
        assert_eq!(*fresh.latest().unwrap(), ScorePoint::zero());
    }

    #[test]
    fn test_value_for_slot() {
        let point = ScorePoint::new(3, 1.5, 2.5);
        assert_eq!(point.value_for(PlayerSlot::Player1), 1.5);
        assert_eq!(point.value_for(PlayerSlot::Player2), 2.5);
    }

    #[test]
    fn test_zero_point_is_zero_for_every_slot() {
        use strum::IntoEnumIterator;

        for slot in PlayerSlot::iter() {
            assert_eq!(ScorePoint::zero().value_for(slot), 0.0);
        }
    }
}
