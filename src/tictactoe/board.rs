//! Board state representation and basic operations

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{GameOutcome, lines::LineAnalyzer};
use crate::error::{Error, MoveRejection, Result};

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | '_' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }

    /// The player owning this cell, if any
    pub fn to_player(self) -> Option<Player> {
        match self {
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
            Cell::Empty => None,
        }
    }
}

/// A player (seat) in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_cell().to_char())
    }
}

/// A (row, col) coordinate on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Build a position from a row-major cell index (0-8)
    pub fn from_index(index: usize) -> Option<Self> {
        (index < 9).then_some(Self::new(index / 3, index % 3))
    }

    /// Row-major cell index, also used as the action index of the Q-table
    pub fn index(self) -> usize {
        self.row * 3 + self.col
    }

    fn in_bounds(self) -> bool {
        self.row < 3 && self.col < 3
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The 3x3 grid.
///
/// The board carries no turn information: whose move it is belongs to the
/// driver (see [`GameSession`](super::GameSession)). It is `Copy` since it
/// is only 9 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BoardState {
    cells: [Cell; 9],
}

impl BoardState {
    /// Create an empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a board from row-major cells
    pub fn from_cells(cells: [Cell; 9]) -> Self {
        Self { cells }
    }

    /// Create a board from a 9-cell string such as `"XX.OO...."`.
    ///
    /// Whitespace is ignored; `.` and `_` mark empty cells.
    ///
    /// # Errors
    ///
    /// Returns error unless exactly 9 cells remain and each is valid.
    pub fn from_string(s: &str) -> Result<Self> {
        let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.len() != 9 {
            return Err(Error::InvalidBoardLength {
                expected: 9,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut cells = [Cell::Empty; 9];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: s.to_string(),
            })?;
        }

        Ok(Self { cells })
    }

    /// Get cell at (row, col). Out-of-range coordinates read as `None`.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        let pos = Position::new(row, col);
        pos.in_bounds().then(|| self.cells[pos.index()])
    }

    /// Get the cell at a position known to be on the board
    pub fn cell(&self, pos: Position) -> Cell {
        self.cells[pos.index()]
    }

    /// Row-major cells
    pub fn as_cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Read-only 3x3 snapshot, for rendering
    pub fn cells(&self) -> [[Cell; 3]; 3] {
        let mut grid = [[Cell::Empty; 3]; 3];
        for (i, &cell) in self.cells.iter().enumerate() {
            grid[i / 3][i % 3] = cell;
        }
        grid
    }

    /// All empty positions in row-major order
    pub fn empty_positions(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .filter_map(|(i, _)| Position::from_index(i))
            .collect()
    }

    /// Place `symbol` at (row, col) and return the new board.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMove`] if the coordinates are outside 0-2 or
    /// the cell is not empty.
    #[must_use = "apply_move returns a new board state; the original is unchanged"]
    pub fn apply_move(&self, row: usize, col: usize, symbol: Player) -> Result<BoardState> {
        let pos = Position::new(row, col);
        if !pos.in_bounds() {
            return Err(Error::InvalidMove {
                row,
                col,
                reason: MoveRejection::OutOfBounds,
            });
        }
        if self.cells[pos.index()] != Cell::Empty {
            return Err(Error::InvalidMove {
                row,
                col,
                reason: MoveRejection::Occupied,
            });
        }

        let mut next = *self;
        next.cells[pos.index()] = symbol.to_cell();
        Ok(next)
    }

    /// Same as [`apply_move`](Self::apply_move) for a [`Position`]
    #[must_use = "apply returns a new board state; the original is unchanged"]
    pub fn apply(&self, pos: Position, symbol: Player) -> Result<BoardState> {
        self.apply_move(pos.row, pos.col, symbol)
    }

    /// Overwrite a cell without validation. Used by search backtracking.
    pub(crate) fn set(&mut self, index: usize, cell: Cell) {
        self.cells[index] = cell;
    }

    /// True iff no empty cell remains
    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != Cell::Empty).count()
    }

    /// Evaluate the position.
    ///
    /// Lines are scanned rows first, then columns, then the two diagonals; the
    /// first completed line decides the winner. A full board with no line is a
    /// tie.
    pub fn evaluate(&self) -> GameOutcome {
        if let Some(player) = self.winner() {
            GameOutcome::Win(player)
        } else if self.is_full() {
            GameOutcome::Tie
        } else {
            GameOutcome::InProgress
        }
    }

    /// The owner of the first completed line in scan order
    pub fn winner(&self) -> Option<Player> {
        LineAnalyzer::first_winning_line(&self.cells).map(|(player, _)| player)
    }

    /// The first completed line in scan order, for highlighting
    pub fn winning_line(&self) -> Option<[Position; 3]> {
        LineAnalyzer::first_winning_line(&self.cells)
            .map(|(_, line)| line.map(|i| Position::new(i / 3, i % 3)))
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &cell) in self.cells.iter().enumerate() {
            write!(f, "{}", cell.to_char())?;
            if (i + 1).is_multiple_of(3) && i < 8 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board() {
        let board = BoardState::new();
        assert_eq!(board.empty_positions().len(), 9);
        assert_eq!(board.evaluate(), GameOutcome::InProgress);
        assert!(!board.is_full());
    }

    #[test]
    fn test_apply_move() {
        let board = BoardState::new();

        let next = board.apply_move(1, 1, Player::X).unwrap();
        assert_eq!(next.get(1, 1), Some(Cell::X));
        // The original is untouched
        assert_eq!(board.get(1, 1), Some(Cell::Empty));

        let err = next.apply_move(1, 1, Player::O).unwrap_err();
        assert!(err.to_string().contains("occupied"));
    }

    #[test]
    fn test_apply_move_out_of_bounds() {
        let board = BoardState::new();
        let err = board.apply_move(3, 0, Player::X).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidMove {
                row: 3,
                col: 0,
                reason: MoveRejection::OutOfBounds
            }
        ));
        assert!(board.apply_move(0, 7, Player::O).is_err());
    }

    #[test]
    fn test_row_win() {
        let board = BoardState::from_string("XXX......").unwrap();
        assert_eq!(board.evaluate(), GameOutcome::Win(Player::X));
        assert_eq!(
            board.winning_line(),
            Some([Position::new(0, 0), Position::new(0, 1), Position::new(0, 2)])
        );
    }

    #[test]
    fn test_diagonal_win() {
        let board = BoardState::from_string("O.X.O.X.O").unwrap();
        assert_eq!(board.evaluate(), GameOutcome::Win(Player::O));
    }

    #[test]
    fn test_tie() {
        // XOX
        // XOO
        // OXX
        let board = BoardState::from_string("XOXXOOOXX").unwrap();
        assert!(board.is_full());
        assert_eq!(board.evaluate(), GameOutcome::Tie);
    }

    #[test]
    fn full_board_with_line_is_a_win_not_a_tie() {
        // XXX
        // OOX
        // XOO
        let board = BoardState::from_string("XXXOOXXOO").unwrap();
        assert!(board.is_full());
        assert_eq!(board.evaluate(), GameOutcome::Win(Player::X));
    }

    #[test]
    fn test_from_string() {
        let board = BoardState::from_string("XO_ ... ...").unwrap();
        assert_eq!(board.get(0, 0), Some(Cell::X));
        assert_eq!(board.get(0, 1), Some(Cell::O));
        assert_eq!(board.occupied_count(), 2);

        assert!(matches!(
            BoardState::from_string("XO"),
            Err(Error::InvalidBoardLength { got: 2, .. })
        ));
        assert!(matches!(
            BoardState::from_string("XOZ......"),
            Err(Error::InvalidCellCharacter { character: 'Z', .. })
        ));
    }

    #[test]
    fn test_cells_snapshot() {
        let board = BoardState::from_string("X...O...X").unwrap();
        let grid = board.cells();
        assert_eq!(grid[0][0], Cell::X);
        assert_eq!(grid[1][1], Cell::O);
        assert_eq!(grid[2][2], Cell::X);
        assert_eq!(grid[2][0], Cell::Empty);
    }

    #[test]
    fn test_display() {
        let board = BoardState::from_string("XOX.O.X..").unwrap();
        assert_eq!(format!("{board}"), "XOX\n.O.\nX..");
    }

    #[test]
    fn test_position_index() {
        for i in 0..9 {
            assert_eq!(Position::from_index(i).unwrap().index(), i);
        }
        assert_eq!(Position::from_index(9), None);
        assert_eq!(Position::new(2, 1).index(), 7);
    }
}
