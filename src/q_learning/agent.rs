//! ε-greedy Q-learning policy shared by both seats
//!
//! One table serves X and O alike: whichever seat is moving reads the same
//! row and writes with the same update rule. Rewards are fixed from O's point
//! of view (see [`reward_for`]).

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};
use tracing::trace;

use crate::{
    error::{Error, Result},
    ports::Learner,
    q_learning::{
        config::QLearningConfig,
        q_table::{ActionValues, QTable},
    },
    tictactoe::{BoardState, GameOutcome, Player, Position, StateEncoding},
};

/// Reward for the move that produced `outcome`: +1 when O wins, -1 when X
/// wins, 0 otherwise.
pub fn reward_for(outcome: GameOutcome) -> f64 {
    match outcome {
        GameOutcome::Win(Player::O) => 1.0,
        GameOutcome::Win(Player::X) => -1.0,
        GameOutcome::Tie | GameOutcome::InProgress => 0.0,
    }
}

/// Tabular Q-learning policy with ε-greedy action selection.
///
/// The random source is injectable so that exploration and tie-breaks can be
/// reproduced in tests.
#[derive(Debug, Clone)]
pub struct QLearningPolicy<R = StdRng> {
    q_table: QTable,
    config: QLearningConfig,
    rng: R,
}

impl QLearningPolicy<StdRng> {
    /// Create a policy seeded from system entropy
    pub fn new(config: QLearningConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_rng(&mut rand::rng()))
    }

    /// Create a policy with a deterministic random source
    pub fn with_seed(config: QLearningConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> QLearningPolicy<R> {
    /// Create a policy drawing randomness from `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the hyperparameters are out
    /// of range.
    pub fn with_rng(config: QLearningConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            q_table: QTable::new(config.learning_rate, config.discount_factor),
            config,
            rng,
        })
    }

    /// Choose a cell for the side to move.
    ///
    /// With probability ε a uniformly random empty cell is returned. Otherwise
    /// the empty cells with the highest stored value are collected and one of
    /// them is drawn uniformly.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoAvailableMove`] on a full board.
    pub fn select_action(&mut self, board: &BoardState) -> Result<Position> {
        let available = board.empty_positions();
        if available.is_empty() {
            return Err(Error::NoAvailableMove);
        }

        if self.rng.random::<f64>() < self.config.exploration_rate {
            let choice = available.choose(&mut self.rng).copied();
            trace!(?choice, "exploring");
            return choice.ok_or(Error::NoAvailableMove);
        }

        let values = self.q_table.values(StateEncoding::encode(board));
        let best_value = available
            .iter()
            .map(|pos| values[pos.index()])
            .fold(f64::NEG_INFINITY, f64::max);
        let best_moves: Vec<Position> = available
            .into_iter()
            .filter(|pos| values[pos.index()] == best_value)
            .collect();

        best_moves
            .choose(&mut self.rng)
            .copied()
            .ok_or(Error::NoAvailableMove)
    }

    /// Apply the TD(0) update for playing `action` on `state_before`.
    ///
    /// Returns the new value of `Q[state_before][action]`.
    pub fn update(
        &mut self,
        state_before: &BoardState,
        action: Position,
        reward: f64,
        state_after: &BoardState,
        terminal: bool,
    ) -> f64 {
        self.q_table.q_learning_update(
            StateEncoding::encode(state_before),
            action.index(),
            reward,
            StateEncoding::encode(state_after),
            terminal,
        )
    }

    /// Stored action values for a board
    pub fn q_values(&self, board: &BoardState) -> ActionValues {
        self.q_table.values(StateEncoding::encode(board))
    }

    pub fn table(&self) -> &QTable {
        &self.q_table
    }

    pub fn config(&self) -> &QLearningConfig {
        &self.config
    }

    /// Change ε between runs, e.g. to 0 for greedy evaluation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `rate` is outside [0, 1].
    pub fn set_exploration_rate(&mut self, rate: f64) -> Result<()> {
        let config = self.config.with_exploration_rate(rate);
        config.validate()?;
        self.config = config;
        Ok(())
    }
}

impl<R: Rng + SeedableRng + Send> Learner for QLearningPolicy<R> {
    fn select_move(&mut self, board: &BoardState, _player: Player) -> Result<Position> {
        self.select_action(board)
    }

    fn name(&self) -> &str {
        "Q-Learning"
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = R::seed_from_u64(seed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn board(s: &str) -> BoardState {
        BoardState::from_string(s).unwrap()
    }

    fn policy(exploration_rate: f64, seed: u64) -> QLearningPolicy {
        let config = QLearningConfig::default().with_exploration_rate(exploration_rate);
        QLearningPolicy::with_seed(config, seed).unwrap()
    }

    #[test]
    fn reward_is_from_o_point_of_view() {
        assert_eq!(reward_for(GameOutcome::Win(Player::O)), 1.0);
        assert_eq!(reward_for(GameOutcome::Win(Player::X)), -1.0);
        assert_eq!(reward_for(GameOutcome::Tie), 0.0);
        assert_eq!(reward_for(GameOutcome::InProgress), 0.0);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = QLearningConfig::default().with_learning_rate(-1.0);
        assert!(QLearningPolicy::with_seed(config, 1).is_err());
    }

    #[test]
    fn full_board_has_no_action() {
        let mut policy = policy(0.2, 1);
        let err = policy.select_action(&board("XOXXOOOXX")).unwrap_err();
        assert!(matches!(err, Error::NoAvailableMove));
    }

    #[test]
    fn terminal_updates_compound() {
        let mut policy = policy(0.2, 1);
        let before = board("XX.OO....");
        let action = Position::new(1, 2);
        let after = before.apply(action, Player::O).unwrap();

        let first = policy.update(&before, action, 1.0, &after, true);
        assert!((first - 0.1).abs() < 1e-12);

        let second = policy.update(&before, action, 1.0, &after, true);
        assert!((second - 0.19).abs() < 1e-12);
        assert!((policy.q_values(&before)[5] - 0.19).abs() < 1e-12);
    }

    #[test]
    fn non_terminal_update_discounts_the_best_successor_value() {
        let mut policy = policy(0.2, 1);
        let before = BoardState::new();
        let action = Position::new(1, 1);
        let after = before.apply(action, Player::X).unwrap();

        // Seed a successor value, then back it up one ply
        let reply = Position::new(0, 0);
        let terminal_like = after.apply(reply, Player::O).unwrap();
        policy.update(&after, reply, 1.0, &terminal_like, true);

        let value = policy.update(&before, action, 0.0, &after, false);
        // 0.1 * (0 + 0.9 * 0.1 - 0) = 0.009
        assert!((value - 0.009).abs() < 1e-12);
    }

    #[test]
    fn greedy_selection_ignores_occupied_cells() {
        let mut policy = policy(0.0, 7);
        let before = board("X........");
        let after = board("XO.......");

        // A large value on the occupied cell must never be chosen
        policy.q_table.set(StateEncoding::encode(&before), 0, 50.0);
        policy.update(&before, Position::new(2, 2), 1.0, &after, true);

        for _ in 0..50 {
            assert_eq!(policy.select_action(&before).unwrap(), Position::new(2, 2));
        }
    }

    #[test]
    fn greedy_ties_are_broken_at_random() {
        let mut policy = policy(0.0, 11);
        let state = BoardState::new();
        let encoded = StateEncoding::encode(&state);
        policy.q_table.set(encoded, 2, 0.5);
        policy.q_table.set(encoded, 6, 0.5);

        let mut seen: HashMap<Position, usize> = HashMap::new();
        for _ in 0..400 {
            *seen.entry(policy.select_action(&state).unwrap()).or_default() += 1;
        }

        assert_eq!(seen.len(), 2);
        assert!(seen[&Position::new(0, 2)] > 100);
        assert!(seen[&Position::new(2, 0)] > 100);
    }

    #[test]
    fn full_exploration_is_uniform_over_empty_cells() {
        let mut policy = policy(1.0, 2024);
        // Four empty cells: (0,2), (1,2), (2,0), (2,1)
        let state = board("XX.OO...X");
        let available = state.empty_positions();
        assert_eq!(available.len(), 4);

        let trials = 40_000;
        let mut counts: HashMap<Position, usize> = HashMap::new();
        for _ in 0..trials {
            *counts.entry(policy.select_action(&state).unwrap()).or_default() += 1;
        }

        assert_eq!(counts.len(), available.len());
        let expected = trials as f64 / available.len() as f64;
        for pos in available {
            let observed = counts[&pos] as f64;
            assert!(
                (observed - expected).abs() / expected < 0.05,
                "cell {pos} drawn {observed} times, expected about {expected}"
            );
        }
    }

    #[test]
    fn same_seed_reproduces_choices() {
        let mut a = policy(0.5, 99);
        let mut b = policy(0.5, 99);
        let state = board("X...O....");
        for _ in 0..20 {
            assert_eq!(
                a.select_action(&state).unwrap(),
                b.select_action(&state).unwrap()
            );
        }
    }

    #[test]
    fn learner_seed_replaces_the_entropy_source() {
        let state = board("X...O....");
        let choices = |seed: u64| {
            let config = QLearningConfig::default().with_exploration_rate(0.5);
            let mut policy = QLearningPolicy::new(config).unwrap();
            policy.set_rng_seed(seed).unwrap();
            (0..20)
                .map(|_| policy.select_action(&state).unwrap())
                .collect::<Vec<_>>()
        };

        assert_eq!(choices(17), choices(17));
    }

    #[test]
    fn exploration_rate_can_be_lowered_between_runs() {
        let mut policy = policy(0.2, 3);
        policy.set_exploration_rate(0.0).unwrap();
        assert_eq!(policy.config().exploration_rate, 0.0);
        assert!(policy.set_exploration_rate(2.0).is_err());
        assert_eq!(policy.config().exploration_rate, 0.0);
    }
}
