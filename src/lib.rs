//! Minimax and Q-learning agents for tic-tac-toe
//!
//! This crate provides:
//! - Tic-tac-toe board, outcome evaluation and base-3 state encoding
//! - Exhaustive minimax search
//! - Tabular Q-learning with ε-greedy selection and self-play training
//! - Matches between random, minimax and learned players

pub mod cli;
pub mod error;
pub mod minimax;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod tictactoe;

pub use error::{Error, Result};
pub use minimax::MinimaxEngine;
pub use q_learning::{QLearningConfig, QLearningPolicy};
pub use tictactoe::{BoardState, GameOutcome, GameSession, Player, Position};
