use rand::Rng;

/// Base magnitude of one turn's growth before weights and variance.
pub const BASE_POWER: f64 = 35.0;

/// Mean-reversion factor: the trailing player's growth is boosted by this
/// fraction of the current gap, biasing toward close finishes.
pub const RUBBER_BAND: f64 = 0.12;

/// Source of uniform draws in `[0, 1)`. Injected so a run can be replayed
/// deterministically in tests.
pub trait RandomSource: Send {
    fn sample(&mut self) -> f64;
}

/// Default source backed by the thread-local rand generator.
#[derive(Debug, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn sample(&mut self) -> f64 {
        rand::rng().random()
    }
}

/// Both players' raw growth for a single turn, before rounding/clamping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnGrowth {
    pub player1: f64,
    pub player2: f64,
}

/// Computes one turn's growth. A single uniform draw feeds both players:
/// `variance` and `2 - variance` are complementary around 1.0, so whatever
/// the draw gives Player 1 it symmetrically takes from Player 2. Growth
/// scales with `sqrt(turn)`, and the rubber-band term pulls the trailing
/// player upward proportionally to the gap.
pub fn turn_growth(
    turn: u32,
    prev_p1: f64,
    prev_p2: f64,
    weight1: f64,
    weight2: f64,
    rng: &mut dyn RandomSource,
) -> TurnGrowth {
    let variance = 1.0 + (rng.sample() - 0.5) * 0.6;
    let base = BASE_POWER * f64::from(turn).sqrt();

    TurnGrowth {
        player1: weight1 * base * variance + (prev_p2 - prev_p1) * RUBBER_BAND,
        player2: weight2 * base * (2.0 - variance) + (prev_p1 - prev_p2) * RUBBER_BAND,
    }
}

/// Applies growth to a previous score: round half-away-from-zero to two
/// decimals, then clamp at zero.
pub fn apply_growth(prev: f64, growth: f64) -> f64 {
    let rounded = ((prev + growth) * 100.0).round() / 100.0;
    rounded.max(0.0)
}

#[cfg(test)]
pub mod test_utils {
    use super::RandomSource;

    /// Replays a fixed sequence of draws, then repeats the last one.
    pub struct FixedSequence {
        draws: Vec<f64>,
        next: usize,
    }

    impl FixedSequence {
        pub fn new(draws: Vec<f64>) -> Self {
            Self { draws, next: 0 }
        }

        pub fn constant(value: f64) -> Self {
            Self::new(vec![value])
        }
    }

    impl RandomSource for FixedSequence {
        fn sample(&mut self) -> f64 {
            let draw = self.draws[self.next.min(self.draws.len() - 1)];
            self.next += 1;
            draw
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_utils::FixedSequence;
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_center_draw_gives_base_growth() {
        // u = 0.5 => variance = 1.0, so both players get weight * 35 * sqrt(turn)
        let mut rng = FixedSequence::constant(0.5);
        let growth = turn_growth(1, 0.0, 0.0, 1.0, 1.0, &mut rng);

        assert_eq!(growth.player1, 35.0);
        assert_eq!(growth.player2, 35.0);
    }

    #[rstest]
    #[case(0.0, 0.7)]
    #[case(0.5, 1.0)]
    #[case(0.9999, 1.29994)]
    fn test_variance_stays_in_band(#[case] draw: f64, #[case] expected: f64) {
        let mut rng = FixedSequence::constant(draw);
        let growth = turn_growth(1, 0.0, 0.0, 1.0, 1.0, &mut rng);

        let variance = growth.player1 / BASE_POWER;
        assert!((variance - expected).abs() < 1e-9);
        assert!((0.7..=1.3).contains(&variance));
    }

    #[rstest]
    #[case(1, 1.0)]
    #[case(1, 2.0)]
    #[case(50, 1.3)]
    #[case(100, 2.0)]
    fn test_growth_non_negative_from_zero(#[case] turn: u32, #[case] weight: f64) {
        // Extreme draws in both directions: with no gap the rubber band is
        // zero and the base term dominates.
        for draw in [0.0, 0.5, 0.9999] {
            let mut rng = FixedSequence::constant(draw);
            let growth = turn_growth(turn, 0.0, 0.0, weight, weight, &mut rng);
            assert!(growth.player1 >= 0.0);
            assert!(growth.player2 >= 0.0);
        }
    }

    #[test]
    fn test_variance_split_is_complementary() {
        let mut rng = FixedSequence::constant(0.8);
        let growth = turn_growth(4, 0.0, 0.0, 1.0, 1.0, &mut rng);

        // variance + (2 - variance) == 2, so equal weights sum to 2 * base
        let base = BASE_POWER * 2.0; // sqrt(4) = 2
        assert!((growth.player1 + growth.player2 - 2.0 * base).abs() < 1e-9);
    }

    #[test]
    fn test_rubber_band_boosts_trailing_player() {
        let mut rng = FixedSequence::constant(0.5);
        // Player 2 trails by 200 points
        let growth = turn_growth(2, 300.0, 100.0, 1.0, 1.0, &mut rng);
        let base = BASE_POWER * f64::from(2u32).sqrt();

        assert!((growth.player1 - (base - 200.0 * RUBBER_BAND)).abs() < 1e-9);
        assert!((growth.player2 - (base + 200.0 * RUBBER_BAND)).abs() < 1e-9);
    }

    #[test]
    fn test_apply_growth_rounds_to_two_decimals() {
        assert_eq!(apply_growth(0.0, 35.005), 35.01);
        assert_eq!(apply_growth(10.0, 2.344), 12.34);
    }

    #[test]
    fn test_apply_growth_clamps_at_zero() {
        // Heavily negative rubber-band delta must not push a score negative
        assert_eq!(apply_growth(5.0, -100.0), 0.0);
    }

    #[test]
    fn test_thread_random_samples_unit_interval() {
        let mut rng = ThreadRandom;
        for _ in 0..100 {
            let draw = rng.sample();
            assert!((0.0..1.0).contains(&draw));
        }
    }
}
