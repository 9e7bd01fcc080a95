//! Tabular Q-learning trained by self-play
//!
//! The policy keeps one action-value row per base-3 board encoding and
//! updates it with one-step temporal difference learning:
//!
//! ```text
//! Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
//! ```
//!
//! Both seats share the table. Rewards are +1 for an O win and -1 for an X
//! win regardless of which seat made the move.
//!
//! ## Usage Example
//!
//! ```
//! use tictactoe_agents::q_learning::{QLearningConfig, QLearningPolicy};
//! use tictactoe_agents::tictactoe::BoardState;
//!
//! let config = QLearningConfig::default().with_exploration_rate(0.1);
//! let mut policy = QLearningPolicy::with_seed(config, 42).unwrap();
//! let action = policy.select_action(&BoardState::new()).unwrap();
//! assert!(action.row < 3 && action.col < 3);
//! ```

pub mod agent;
pub mod config;
pub mod q_table;

pub use agent::{QLearningPolicy, reward_for};
pub use config::{
    DEFAULT_DISCOUNT_FACTOR, DEFAULT_EPISODES, DEFAULT_EXPLORATION_RATE, DEFAULT_LEARNING_RATE,
    QLearningConfig,
};
pub use q_table::{ActionValues, QTable};
