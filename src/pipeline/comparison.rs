//! Head-to-head matches between move-selection strategies
//!
//! This module provides learners for the baseline drivers:
//! - Random baselines
//! - Exhaustive minimax
//!
//! and a [`MatchRunner`] that pits any two [`Learner`]s against each other.

use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    Error, Result,
    minimax::MinimaxEngine,
    ports::{Learner, Observer},
    tictactoe::{BoardState, EpisodeCounters, GameOutcome, GameSession, Player, Position},
};

/// Exhaustive minimax learner
///
/// Keeps one engine per seat so each side maximizes its own symbol.
pub struct MinimaxLearner {
    name: String,
    x_engine: MinimaxEngine,
    o_engine: MinimaxEngine,
}

impl MinimaxLearner {
    /// Create a new minimax learner
    pub fn new(name: String) -> Self {
        Self {
            name,
            x_engine: MinimaxEngine::new(Player::X),
            o_engine: MinimaxEngine::new(Player::O),
        }
    }

    fn engine(&self, player: Player) -> &MinimaxEngine {
        match player {
            Player::X => &self.x_engine,
            Player::O => &self.o_engine,
        }
    }
}

impl Learner for MinimaxLearner {
    fn select_move(&mut self, board: &BoardState, player: Player) -> Result<Position> {
        self.engine(player).find_best_move(board)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Random policy learner (baseline)
pub struct RandomLearner {
    name: String,
    rng: StdRng,
}

impl RandomLearner {
    /// Create a new random learner seeded from system entropy
    pub fn new(name: String) -> Self {
        Self {
            name,
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Create a new random learner with a deterministic seed
    pub fn with_seed(name: String, seed: u64) -> Self {
        Self {
            name,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Learner for RandomLearner {
    fn select_move(&mut self, board: &BoardState, _player: Player) -> Result<Position> {
        board
            .empty_positions()
            .choose(&mut self.rng)
            .copied()
            .ok_or(Error::NoAvailableMove)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }
}

/// Outcome of a match between two learners
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Name of the learner seated as X
    pub x_learner: String,
    /// Name of the learner seated as O
    pub o_learner: String,
    pub games: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub ties: usize,
}

impl MatchResult {
    fn new(x_learner: &str, o_learner: &str, counters: EpisodeCounters) -> Self {
        Self {
            x_learner: x_learner.to_string(),
            o_learner: o_learner.to_string(),
            games: counters.total(),
            x_wins: counters.x_wins,
            o_wins: counters.o_wins,
            ties: counters.ties,
        }
    }

    /// One-line score, X reported as player 1
    pub fn score_line(&self) -> String {
        format!(
            "Player 1: {}  Player 2: {}  Ties: {}",
            self.x_wins, self.o_wins, self.ties
        )
    }
}

/// Plays full games between an X learner and an O learner.
///
/// X opens every game. Learners only select moves; nothing is trained.
pub struct MatchRunner {
    observers: Vec<Box<dyn Observer>>,
    seed: Option<u64>,
}

impl MatchRunner {
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
            seed: None,
        }
    }

    /// Add an observer to the runner
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Seed both learners before the first game (X gets `seed`, O `seed + 1`)
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Play `games` games and return the tallies
    pub fn run(
        &mut self,
        x: &mut dyn Learner,
        o: &mut dyn Learner,
        games: usize,
    ) -> Result<MatchResult> {
        if let Some(seed) = self.seed {
            x.set_rng_seed(seed)?;
            o.set_rng_seed(seed.wrapping_add(1))?;
        }

        for observer in &mut self.observers {
            observer.on_training_start(games)?;
        }

        let mut session = GameSession::new();
        for game_num in 0..games {
            session.reset();
            let outcome = self.play_game(&mut session, game_num, x, o)?;
            debug!(game_num, ?outcome, "match game finished");
            for observer in &mut self.observers {
                observer.on_game_end(game_num, outcome)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        let result = MatchResult::new(x.name(), o.name(), session.counters());
        info!(
            x = %result.x_learner,
            o = %result.o_learner,
            games = result.games,
            x_wins = result.x_wins,
            o_wins = result.o_wins,
            ties = result.ties,
            "match finished"
        );
        Ok(result)
    }

    fn play_game(
        &mut self,
        session: &mut GameSession,
        game_num: usize,
        x: &mut dyn Learner,
        o: &mut dyn Learner,
    ) -> Result<GameOutcome> {
        for observer in &mut self.observers {
            observer.on_game_start(game_num)?;
        }

        let mut step_num = 0;
        loop {
            let board = *session.board();
            let player = session.to_move();
            let learner: &mut dyn Learner = match player {
                Player::X => &mut *x,
                Player::O => &mut *o,
            };

            let position = learner.select_move(&board, player)?;
            let outcome = session.play(position)?;
            for observer in &mut self.observers {
                observer.on_move(game_num, step_num, &board, player, position, 0.0)?;
            }
            step_num += 1;

            if outcome.is_terminal() {
                return Ok(outcome);
            }
        }
    }
}

impl Default for MatchRunner {
    fn default() -> Self {
        Self::new()
    }
}
