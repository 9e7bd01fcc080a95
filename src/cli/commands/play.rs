//! Play command - Matches between baseline players

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use crate::{
    cli::output::{print_match_result, print_section},
    pipeline::{Learner, MatchRunner, MinimaxLearner, ProgressObserver, RandomLearner},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlayerKind {
    /// Uniformly random empty cell
    Random,
    /// Exhaustive minimax search
    Minimax,
}

impl PlayerKind {
    fn learner(self, name: &str) -> Box<dyn Learner> {
        match self {
            Self::Random => Box::new(RandomLearner::new(format!("Random ({name})"))),
            Self::Minimax => Box::new(MinimaxLearner::new(format!("Minimax ({name})"))),
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Play games between two baseline players")]
pub struct PlayArgs {
    /// Player seated as X (moves first)
    #[arg(long, value_enum, default_value_t = PlayerKind::Random)]
    pub x: PlayerKind,

    /// Player seated as O
    #[arg(long, value_enum, default_value_t = PlayerKind::Random)]
    pub o: PlayerKind,

    /// Number of games
    #[arg(long, short = 'g', default_value_t = 10)]
    pub games: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Show a progress bar
    #[arg(long, default_value_t = false)]
    pub progress: bool,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let mut x = args.x.learner("X");
    let mut o = args.o.learner("O");

    let mut runner = MatchRunner::new();
    if let Some(seed) = args.seed {
        runner = runner.with_seed(seed);
    }
    if args.progress {
        runner = runner.with_observer(Box::new(ProgressObserver::new()));
    }

    let result = runner
        .run(x.as_mut(), o.as_mut(), args.games)
        .context("match failed")?;

    print_section("Match results");
    print_match_result(&result);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_random_players() {
        let args = PlayArgs::parse_from(["play"]);
        assert_eq!(args.x, PlayerKind::Random);
        assert_eq!(args.o, PlayerKind::Random);
        assert_eq!(args.games, 10);
    }

    #[test]
    fn seeded_match_runs() {
        let args = PlayArgs::parse_from(["play", "--o", "minimax", "--games", "3", "--seed", "4"]);
        assert!(execute(args).is_ok());
    }
}
