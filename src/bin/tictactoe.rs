//! Tic-tac-toe agents CLI
//!
//! This CLI provides a unified interface for:
//! - Training a Q-learning policy by self-play
//! - Playing matches between random and minimax players
//! - Asking minimax for the best move in a position

use anyhow::Result;
use clap::{Parser, Subcommand};
use tictactoe_agents::cli::commands::{best_move, play, train};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tictactoe")]
#[command(version, about = "Minimax and Q-learning agents for tic-tac-toe", long_about = None)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a Q-learning policy by self-play
    Train(train::TrainArgs),

    /// Play games between random and minimax players
    Play(play::PlayArgs),

    /// Print the minimax move for a board
    BestMove(best_move::BestMoveArgs),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Train(args) => train::execute(args),
        Commands::Play(args) => play::execute(args),
        Commands::BestMove(args) => best_move::execute(args),
    }
}
