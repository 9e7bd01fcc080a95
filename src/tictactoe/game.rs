//! Game session management: outcome, counters and the turn-tracking session

use serde::{Deserialize, Serialize};

use super::board::{BoardState, Player, Position};
use crate::error::{Error, Result};

/// Outcome of a game at some point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    InProgress,
    Win(Player),
    Tie,
}

impl GameOutcome {
    /// True once no further moves may be played
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameOutcome::InProgress)
    }
}

/// Win/tie counters across episodes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeCounters {
    pub x_wins: usize,
    pub o_wins: usize,
    pub ties: usize,
}

impl EpisodeCounters {
    /// Record a finished game. In-progress outcomes are ignored.
    pub fn record(&mut self, outcome: GameOutcome) {
        match outcome {
            GameOutcome::Win(Player::X) => self.x_wins += 1,
            GameOutcome::Win(Player::O) => self.o_wins += 1,
            GameOutcome::Tie => self.ties += 1,
            GameOutcome::InProgress => {}
        }
    }

    /// Total number of finished games
    pub fn total(&self) -> usize {
        self.x_wins + self.o_wins + self.ties
    }
}

/// A game in progress plus the score across games.
///
/// X always opens. The session tracks whose turn it is, rejects moves once
/// the game is decided, and keeps the counters across [`reset`](Self::reset).
#[derive(Debug, Clone)]
pub struct GameSession {
    board: BoardState,
    to_move: Player,
    outcome: GameOutcome,
    counters: EpisodeCounters,
}

impl GameSession {
    /// Create a session with an empty board and X to move
    pub fn new() -> Self {
        Self {
            board: BoardState::new(),
            to_move: Player::X,
            outcome: GameOutcome::InProgress,
            counters: EpisodeCounters::default(),
        }
    }

    /// Current board snapshot
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    /// The seat to move next (the seat that moved last once the game is over)
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Current outcome
    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    pub fn counters(&self) -> EpisodeCounters {
        self.counters
    }

    /// Play the current seat's symbol at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GameOver`] if the game is already decided and
    /// [`Error::InvalidMove`] if the cell cannot take a symbol.
    pub fn play(&mut self, pos: Position) -> Result<GameOutcome> {
        if self.outcome.is_terminal() {
            return Err(Error::GameOver);
        }

        self.board = self.board.apply(pos, self.to_move)?;

        let outcome = self.board.evaluate();
        self.outcome = outcome;
        if outcome.is_terminal() {
            self.counters.record(outcome);
        } else {
            self.to_move = self.to_move.opponent();
        }

        Ok(outcome)
    }

    /// Start a new game. Counters are kept.
    pub fn reset(&mut self) {
        self.board = BoardState::new();
        self.to_move = Player::X;
        self.outcome = GameOutcome::InProgress;
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
