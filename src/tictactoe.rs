//! Tic-Tac-Toe board, terminal evaluation and game sessions

pub mod board;
pub mod encoding;
pub mod game;
pub mod lines;

pub use board::{BoardState, Cell, Player, Position};
pub use encoding::StateEncoding;
pub use game::{EpisodeCounters, GameOutcome, GameSession};
pub use lines::{LineAnalyzer, WINNING_LINES};
