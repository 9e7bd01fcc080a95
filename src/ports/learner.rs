//! Learner port - abstraction over move-selection strategies
//!
//! This port defines the interface that every automated player implements,
//! allowing drivers to work with:
//! - Tabular Q-learning policies
//! - Exhaustive minimax search
//! - Random baselines

use crate::{
    Result,
    tictactoe::{BoardState, Player, Position},
};

/// Unified interface for all move-selection strategies
///
/// Drivers such as [`MatchRunner`](crate::pipeline::MatchRunner) only see
/// this trait, so any two strategies can be pitted against each other.
///
/// # Examples
///
/// ```no_run
/// use tictactoe_agents::{
///     ports::Learner,
///     tictactoe::{BoardState, Player},
/// };
///
/// fn opening<L: Learner>(learner: &mut L) -> tictactoe_agents::Result<()> {
///     let pos = learner.select_move(&BoardState::new(), Player::X)?;
///     println!("{} opens at {pos}", learner.name());
///     Ok(())
/// }
/// ```
pub trait Learner: Send {
    /// Select a cell for `player` on the given board.
    ///
    /// # Errors
    ///
    /// Returns an error if no empty cell is available.
    fn select_move(&mut self, board: &BoardState, player: Player) -> Result<Position>;

    /// Get the learner's name.
    ///
    /// Used for identification in reports and logging.
    fn name(&self) -> &str;

    /// Seed the learner's internal random number generator.
    ///
    /// Drivers call this when supplied with a deterministic seed.
    /// Deterministic learners can ignore it.
    ///
    /// # Default Implementation
    ///
    /// Does nothing and returns `Ok(())`.
    fn set_rng_seed(&mut self, _seed: u64) -> Result<()> {
        Ok(())
    }
}
