use thiserror::Error;

pub const DEFAULT_WIN_TARGET: u32 = 2048;
pub const DEFAULT_FOUR_PROBABILITY: f64 = 0.1;
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Tunables of a game session.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Tile value that wins the round.
    pub win_target: u32,
    /// Probability that a spawned tile is a 4 rather than a 2.
    pub four_probability: f64,
    /// Number of finished runs kept in the history.
    pub history_capacity: usize,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("win target {0} must be a power of two of at least 4")]
    WinTarget(u32),
    #[error("four probability {0} must lie within [0, 1]")]
    FourProbability(f64),
    #[error("history must keep at least one run")]
    HistoryCapacity,
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.win_target < 4 || !self.win_target.is_power_of_two() {
            return Err(ConfigError::WinTarget(self.win_target));
        }

        if !(0.0..=1.0).contains(&self.four_probability) {
            return Err(ConfigError::FourProbability(self.four_probability));
        }

        if self.history_capacity == 0 {
            return Err(ConfigError::HistoryCapacity);
        }

        Ok(())
    }

    pub fn validated(self) -> Result<Self, ConfigError> {
        self.validate().map(|()| self)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            win_target: DEFAULT_WIN_TARGET,
            four_probability: DEFAULT_FOUR_PROBABILITY,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}
