//! Exhaustive minimax search
//!
//! The engine searches the full game tree below a position with no pruning
//! and no depth limit; a 3x3 board bounds the depth to nine plies. Terminal
//! scores are depth-independent: a win in one ply and a win in five plies
//! both score `+10`.

use crate::{
    error::{Error, Result},
    tictactoe::{BoardState, Cell, GameOutcome, Player, Position},
};

/// Score of a position won by the maximizing symbol
pub const WIN_SCORE: i32 = 10;

/// Score of a position won by the minimizing symbol
pub const LOSS_SCORE: i32 = -10;

/// Full-depth minimax for one designated maximizing symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinimaxEngine {
    maximizer: Player,
}

impl MinimaxEngine {
    /// Create an engine that plays for `maximizer`
    pub fn new(maximizer: Player) -> Self {
        Self { maximizer }
    }

    /// `+10` if the first completed line belongs to the maximizer, `-10` if it
    /// belongs to the opponent, `0` otherwise.
    pub fn static_score(&self, board: &BoardState) -> i32 {
        match board.evaluate() {
            GameOutcome::Win(player) if player == self.maximizer => WIN_SCORE,
            GameOutcome::Win(_) => LOSS_SCORE,
            GameOutcome::Tie | GameOutcome::InProgress => 0,
        }
    }

    /// Value of `board` with `is_maximizing` telling whose symbol moves next
    pub fn minimax(&self, board: &BoardState, is_maximizing: bool) -> i32 {
        let mut scratch = *board;
        self.search(&mut scratch, is_maximizing)
    }

    /// Pick the first empty cell, in row-major order, whose reply value is
    /// maximal.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoAvailableMove`] if the board is full.
    pub fn find_best_move(&self, board: &BoardState) -> Result<Position> {
        let mut scratch = *board;
        let symbol = self.maximizer.to_cell();
        let mut best: Option<(Position, i32)> = None;

        for pos in board.empty_positions() {
            scratch.set(pos.index(), symbol);
            let value = self.search(&mut scratch, false);
            scratch.set(pos.index(), Cell::Empty);

            if best.is_none_or(|(_, best_value)| value > best_value) {
                best = Some((pos, value));
            }
        }

        best.map(|(pos, _)| pos).ok_or(Error::NoAvailableMove)
    }

    fn search(&self, board: &mut BoardState, is_maximizing: bool) -> i32 {
        let score = self.static_score(board);
        if score != 0 {
            return score;
        }
        if board.is_full() {
            return 0;
        }

        let (symbol, mut best) = if is_maximizing {
            (self.maximizer.to_cell(), i32::MIN)
        } else {
            (self.maximizer.opponent().to_cell(), i32::MAX)
        };

        for index in 0..9 {
            if board.as_cells()[index] != Cell::Empty {
                continue;
            }
            board.set(index, symbol);
            let value = self.search(board, !is_maximizing);
            board.set(index, Cell::Empty);

            best = if is_maximizing {
                best.max(value)
            } else {
                best.min(value)
            };
        }

        best
    }
}

impl Default for MinimaxEngine {
    fn default() -> Self {
        Self::new(Player::X)
    }
}
