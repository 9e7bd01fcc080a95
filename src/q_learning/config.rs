//! Hyperparameters for Q-learning self-play

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default learning rate α
pub const DEFAULT_LEARNING_RATE: f64 = 0.1;

/// Default discount factor γ
pub const DEFAULT_DISCOUNT_FACTOR: f64 = 0.9;

/// Default exploration rate ε
pub const DEFAULT_EXPLORATION_RATE: f64 = 0.2;

/// Default number of self-play training episodes
pub const DEFAULT_EPISODES: usize = 10;

/// Configuration for a Q-learning training run.
///
/// Values are fixed before a run starts; nothing reconfigures them mid-episode.
///
/// # Examples
///
/// ```
/// use tictactoe_agents::q_learning::QLearningConfig;
///
/// let config = QLearningConfig::default()
///     .with_learning_rate(0.5)
///     .with_episodes(1_000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QLearningConfig {
    /// How strongly a new observation overwrites the old value (α)
    pub learning_rate: f64,
    /// Weight of the best successor value (γ)
    pub discount_factor: f64,
    /// Probability of a uniformly random legal move (ε)
    pub exploration_rate: f64,
    /// Number of self-play episodes (N)
    pub episodes: usize,
}

impl Default for QLearningConfig {
    fn default() -> Self {
        Self {
            learning_rate: DEFAULT_LEARNING_RATE,
            discount_factor: DEFAULT_DISCOUNT_FACTOR,
            exploration_rate: DEFAULT_EXPLORATION_RATE,
            episodes: DEFAULT_EPISODES,
        }
    }
}

impl QLearningConfig {
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_discount_factor(mut self, discount_factor: f64) -> Self {
        self.discount_factor = discount_factor;
        self
    }

    pub fn with_exploration_rate(mut self, exploration_rate: f64) -> Self {
        self.exploration_rate = exploration_rate;
        self
    }

    pub fn with_episodes(mut self, episodes: usize) -> Self {
        self.episodes = episodes;
        self
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] when a value is outside its range:
    /// α in (0, 1], γ and ε in [0, 1], at least one episode.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| Err(Error::InvalidConfiguration { message });

        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return invalid(format!(
                "learning rate must be in (0, 1], got {}",
                self.learning_rate
            ));
        }
        if !(0.0..=1.0).contains(&self.discount_factor) {
            return invalid(format!(
                "discount factor must be in [0, 1], got {}",
                self.discount_factor
            ));
        }
        if !(0.0..=1.0).contains(&self.exploration_rate) {
            return invalid(format!(
                "exploration rate must be in [0, 1], got {}",
                self.exploration_rate
            ));
        }
        if self.episodes == 0 {
            return invalid("episode count must be at least 1".to_string());
        }
        Ok(())
    }
}
