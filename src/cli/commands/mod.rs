//! Subcommands of the `tictactoe` binary

pub mod best_move;
pub mod play;
pub mod train;
