use serde::{Deserialize, Serialize};

pub const MIN_WEIGHT: f64 = 1.0;
pub const MAX_WEIGHT: f64 = 2.0;
pub const MIN_TURNS: u32 = 1;
pub const MAX_TURNS: u32 = 100;

const DEFAULT_WEIGHT: f64 = 1.2;
const DEFAULT_MAX_TURNS: u32 = 25;

/// Per-player settings. Display names are upper-cased; out-of-range
/// weights are clamped rather than rejected. The engine only honors
/// mutations while idle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    name: String,
    weight: f64,
}

impl PlayerConfig {
    pub fn new(name: &str, weight: f64) -> Self {
        let mut config = Self {
            name: String::new(),
            weight: DEFAULT_WEIGHT,
        };
        config.set_name(name);
        config.set_weight(weight);
        config
    }

    /// Upper-cases the name. An all-whitespace name is ignored so the
    /// display string stays non-empty.
    pub fn set_name(&mut self, name: &str) {
        let trimmed = name.trim();
        if !trimmed.is_empty() {
            self.name = trimmed.to_uppercase();
        }
    }

    pub fn set_weight(&mut self, weight: f64) {
        self.weight = weight.clamp(MIN_WEIGHT, MAX_WEIGHT);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

/// Run-wide settings, clamped to the allowed turn range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    max_turns: u32,
}

impl RunConfig {
    pub fn new(max_turns: u32) -> Self {
        Self {
            max_turns: max_turns.clamp(MIN_TURNS, MAX_TURNS),
        }
    }

    pub fn set_max_turns(&mut self, max_turns: u32) {
        self.max_turns = max_turns.clamp(MIN_TURNS, MAX_TURNS);
    }

    pub fn max_turns(&self) -> u32 {
        self.max_turns
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TURNS)
    }
}

/// Defaults matching the original table: two anonymous contenders at
/// weight 1.2.
pub fn default_players() -> (PlayerConfig, PlayerConfig) {
    (
        PlayerConfig::new("Player One", DEFAULT_WEIGHT),
        PlayerConfig::new("Player Two", DEFAULT_WEIGHT),
    )
}
