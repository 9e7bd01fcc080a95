//! Base-3 state encoding used as the Q-table key

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{BoardState, Cell};
use crate::error::{Error, Result};

/// A board packed into a base-3 integer.
///
/// The digit at position `row * 3 + col` is 0 for empty, 1 for X and 2 for O,
/// so the value is `sum(digit * 3^position)`. Every value in `0..3^9` decodes
/// to a board, including positions that cannot arise in play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateEncoding(u16);

impl StateEncoding {
    /// Number of distinct encodings (3^9)
    pub const COUNT: u32 = 19_683;

    /// Wrap a raw value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEncoding`] if `value >= 3^9`.
    pub fn new(value: u32) -> Result<Self> {
        if value < Self::COUNT {
            Ok(Self(value as u16))
        } else {
            Err(Error::InvalidEncoding { value })
        }
    }

    /// Encode a board
    pub fn encode(board: &BoardState) -> Self {
        let value = board
            .as_cells()
            .iter()
            .rev()
            .fold(0u16, |acc, &cell| acc * 3 + digit(cell));
        Self(value)
    }

    /// Decode back into a board
    pub fn decode(self) -> BoardState {
        let mut cells = [Cell::Empty; 9];
        let mut rest = self.0;
        for cell in &mut cells {
            *cell = match rest % 3 {
                0 => Cell::Empty,
                1 => Cell::X,
                _ => Cell::O,
            };
            rest /= 3;
        }
        BoardState::from_cells(cells)
    }

    /// Iterate over every encoding in ascending order
    pub fn all() -> impl Iterator<Item = StateEncoding> {
        (0..Self::COUNT as u16).map(StateEncoding)
    }

    pub fn value(self) -> u32 {
        u32::from(self.0)
    }
}

fn digit(cell: Cell) -> u16 {
    match cell {
        Cell::Empty => 0,
        Cell::X => 1,
        Cell::O => 2,
    }
}

impl From<&BoardState> for StateEncoding {
    fn from(board: &BoardState) -> Self {
        Self::encode(board)
    }
}

impl TryFrom<u32> for StateEncoding {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        Self::new(value)
    }
}

impl fmt::Display for StateEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
