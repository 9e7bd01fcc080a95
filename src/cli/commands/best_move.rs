//! Best-move command - Minimax answer for a single position

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    cli::config::parse_player_token,
    minimax::MinimaxEngine,
    tictactoe::{BoardState, Position},
};

#[derive(Parser, Debug)]
#[command(about = "Print the minimax move for a board as `row col`")]
pub struct BestMoveArgs {
    /// Nine cells in row-major order using X, O and . (or _) for empty
    pub board: String,

    /// Seat to move for (`x` or `o`)
    #[arg(long, default_value = "x")]
    pub player: String,
}

/// Compute the move without printing it
pub fn best_move(args: &BestMoveArgs) -> Result<Position> {
    let player = parse_player_token(&args.player, "--player")?;
    let board = BoardState::from_string(&args.board)
        .with_context(|| format!("invalid board '{}'", args.board))?;
    let position = MinimaxEngine::new(player)
        .find_best_move(&board)
        .context("no move available")?;
    Ok(position)
}

pub fn execute(args: BestMoveArgs) -> Result<()> {
    let position = best_move(&args)?;
    println!("{} {}", position.row, position.col);
    Ok(())
}
