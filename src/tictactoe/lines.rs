//! Winning line analysis for Tic-Tac-Toe

use super::{Cell, Player};

/// Winning line indices on the 3x3 board, in evaluation scan order
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Utility for analyzing winning lines in Tic-Tac-Toe
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Find the first completed line in scan order (rows, columns, diagonals).
    ///
    /// Boards holding more than one completed line report only the first one;
    /// callers rely on this order as the tie-break.
    pub fn first_winning_line(cells: &[Cell; 9]) -> Option<(Player, [usize; 3])> {
        WINNING_LINES.iter().find_map(|&line| {
            let [a, b, c] = line;
            let player = cells[a].to_player()?;
            (cells[b] == cells[a] && cells[c] == cells[a]).then_some((player, line))
        })
    }
}
