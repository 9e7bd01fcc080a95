//! Self-play training for the shared Q-learning policy

use rand::{Rng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    Result,
    ports::Observer,
    q_learning::{QLearningPolicy, reward_for},
    tictactoe::{EpisodeCounters, GameOutcome, GameSession},
};

/// Tallies of a self-play training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Total games played
    pub total_games: usize,

    /// Games won by X
    pub x_wins: usize,

    /// Games won by O
    pub o_wins: usize,

    /// Drawn games
    pub ties: usize,

    pub x_win_rate: f64,
    pub o_win_rate: f64,
    pub tie_rate: f64,
}

impl TrainingResult {
    /// Create a result from episode counters
    pub fn new(counters: EpisodeCounters) -> Self {
        let total_games = counters.total();
        let rate = |count: usize| {
            if total_games > 0 {
                count as f64 / total_games as f64
            } else {
                0.0
            }
        };

        Self {
            total_games,
            x_wins: counters.x_wins,
            o_wins: counters.o_wins,
            ties: counters.ties,
            x_win_rate: rate(counters.x_wins),
            o_win_rate: rate(counters.o_wins),
            tie_rate: rate(counters.ties),
        }
    }
}

/// Runs Q-learning episodes in which one policy plays both seats.
///
/// Every ply is selected by the policy, applied to the session, scored with
/// [`reward_for`] and fed back through a TD(0) update before the seat flips.
/// The table is never reset between episodes; counters accumulate for the
/// lifetime of the driver.
pub struct SelfPlayDriver<R = StdRng> {
    policy: QLearningPolicy<R>,
    session: GameSession,
    observers: Vec<Box<dyn Observer>>,
}

impl<R: Rng> SelfPlayDriver<R> {
    /// Create a driver around a policy
    pub fn new(policy: QLearningPolicy<R>) -> Self {
        Self {
            policy,
            session: GameSession::new(),
            observers: Vec::new(),
        }
    }

    /// Add an observer to the driver
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Run the configured number of episodes
    pub fn run(&mut self) -> Result<TrainingResult> {
        let episodes = self.policy.config().episodes;
        self.run_episodes(episodes)
    }

    /// Run `episodes` episodes and return the cumulative counters.
    ///
    /// Observers see episode indices counted from 0 within this run.
    pub fn run_episodes(&mut self, episodes: usize) -> Result<TrainingResult> {
        for observer in &mut self.observers {
            observer.on_training_start(episodes)?;
        }

        for episode in 0..episodes {
            let outcome = self.play_episode(episode)?;
            for observer in &mut self.observers {
                observer.on_game_end(episode, outcome)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        let result = TrainingResult::new(self.session.counters());
        info!(
            episodes = result.total_games,
            x_wins = result.x_wins,
            o_wins = result.o_wins,
            ties = result.ties,
            "self-play training finished"
        );
        Ok(result)
    }

    /// Play one episode from an empty board to a terminal outcome.
    ///
    /// `episode` is the index reported to observers.
    pub fn play_episode(&mut self, episode: usize) -> Result<GameOutcome> {
        self.session.reset();
        for observer in &mut self.observers {
            observer.on_game_start(episode)?;
        }

        let mut step_num = 0;
        loop {
            let before = *self.session.board();
            let player = self.session.to_move();

            let action = self.policy.select_action(&before)?;
            let outcome = self.session.play(action)?;
            let reward = reward_for(outcome);
            let after = *self.session.board();
            let value = self
                .policy
                .update(&before, action, reward, &after, outcome.is_terminal());

            debug!(episode, %player, %action, reward, value, "ply");
            for observer in &mut self.observers {
                observer.on_move(episode, step_num, &before, player, action, reward)?;
            }
            step_num += 1;

            if outcome.is_terminal() {
                debug!(episode, ?outcome, plies = step_num, "episode finished");
                return Ok(outcome);
            }
        }
    }

    pub fn policy(&self) -> &QLearningPolicy<R> {
        &self.policy
    }

    /// Hand the trained policy back, e.g. for evaluation
    pub fn into_policy(self) -> QLearningPolicy<R> {
        self.policy
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn counters(&self) -> EpisodeCounters {
        self.session.counters()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        sync::{Arc, Mutex},
    };

    use super::*;
    use crate::{
        q_learning::QLearningConfig,
        tictactoe::{BoardState, Player, Position, StateEncoding},
    };

    /// Keeps every event a driver reports
    #[derive(Default)]
    struct Recorder {
        starts: Vec<usize>,
        plies: Vec<(usize, BoardState, Player, Position, f64)>,
        ends: Vec<(usize, GameOutcome)>,
    }

    impl Observer for Recorder {
        fn on_game_start(&mut self, game_num: usize) -> Result<()> {
            self.starts.push(game_num);
            Ok(())
        }

        fn on_move(
            &mut self,
            game_num: usize,
            _step_num: usize,
            board: &BoardState,
            player: Player,
            position: Position,
            reward: f64,
        ) -> Result<()> {
            self.plies.push((game_num, *board, player, position, reward));
            Ok(())
        }

        fn on_game_end(&mut self, game_num: usize, outcome: GameOutcome) -> Result<()> {
            self.ends.push((game_num, outcome));
            Ok(())
        }
    }

    fn driver(episodes: usize, seed: u64) -> SelfPlayDriver {
        let config = QLearningConfig::default().with_episodes(episodes);
        SelfPlayDriver::new(QLearningPolicy::with_seed(config, seed).unwrap())
    }

    #[test]
    fn test_training_counts_every_episode() {
        let mut driver = driver(10, 42);
        let result = driver.run().unwrap();

        assert_eq!(result.total_games, 10);
        assert_eq!(result.x_wins + result.o_wins + result.ties, 10);
        assert!((result.x_win_rate + result.o_win_rate + result.tie_rate - 1.0).abs() < 1e-9);
    }

    #[test]
    fn episodes_end_on_a_terminal_board() {
        let mut driver = driver(1, 5);
        let outcome = driver.play_episode(0).unwrap();
        assert!(outcome.is_terminal());
        assert_eq!(driver.session().board().evaluate(), outcome);
    }

    #[test]
    fn learning_compounds_across_runs() {
        let touched = |driver: &SelfPlayDriver| {
            StateEncoding::all()
                .filter(|&s| driver.policy().table().values(s) != [0.0; 9])
                .count()
        };

        let mut driver = driver(25, 8);
        driver.run().unwrap();
        let after_first = touched(&driver);
        assert!(after_first > 0);

        driver.run().unwrap();
        assert_eq!(driver.counters().total(), 50);
        assert!(touched(&driver) >= after_first);
    }

    #[test]
    fn episode_indices_restart_with_each_run() {
        let recorder = Arc::new(Mutex::new(Recorder::default()));
        let mut driver = driver(3, 13).with_observer(Box::new(Arc::clone(&recorder)));
        driver.run().unwrap();
        driver.run().unwrap();

        let recorder = recorder.lock().unwrap();
        assert_eq!(recorder.starts, vec![0, 1, 2, 0, 1, 2]);
        let ends: Vec<usize> = recorder.ends.iter().map(|&(game, _)| game).collect();
        assert_eq!(ends, vec![0, 1, 2, 0, 1, 2]);
        assert_eq!(driver.counters().total(), 6);
    }

    #[test]
    fn every_ply_is_backed_up_from_the_board_before_the_move() {
        let config = QLearningConfig::default().with_episodes(3);
        let (alpha, gamma) = (config.learning_rate, config.discount_factor);
        let recorder = Arc::new(Mutex::new(Recorder::default()));
        let mut driver = SelfPlayDriver::new(QLearningPolicy::with_seed(config, 29).unwrap())
            .with_observer(Box::new(Arc::clone(&recorder)));
        driver.run().unwrap();
        let recorder = recorder.lock().unwrap();

        // Replay the recorded plies against an independent table
        let mut mirror: HashMap<StateEncoding, [f64; 9]> = HashMap::new();
        for &(game, outcome) in &recorder.ends {
            let plies: Vec<_> = recorder.plies.iter().filter(|p| p.0 == game).collect();
            let (last, earlier) = plies.split_last().unwrap();

            for &&(_, before, player, position, reward) in earlier {
                assert_eq!(reward, 0.0);
                let after = before.apply(position, player).unwrap();
                assert_eq!(after.evaluate(), GameOutcome::InProgress);
                let next_max = mirror
                    .get(&StateEncoding::encode(&after))
                    .map_or(0.0, |row| row.iter().copied().fold(f64::NEG_INFINITY, f64::max));
                let row = mirror.entry(StateEncoding::encode(&before)).or_default();
                let old = row[position.index()];
                row[position.index()] = old + alpha * (reward + gamma * next_max - old);
            }

            let &(_, before, player, position, reward) = *last;
            assert_eq!(reward, reward_for(outcome));
            assert_eq!(before.apply(position, player).unwrap().evaluate(), outcome);
            let row = mirror.entry(StateEncoding::encode(&before)).or_default();
            let old = row[position.index()];
            row[position.index()] = old + alpha * (reward - old);

            if game == 0 {
                // Fresh table: the terminal ply holds exactly α·r
                assert!((row[position.index()] - alpha * reward).abs() < 1e-12);
            }
        }

        let table = driver.policy().table();
        for (&state, row) in &mirror {
            let stored = table.values(state);
            for (action, (&want, &got)) in row.iter().zip(stored.iter()).enumerate() {
                assert!(
                    (want - got).abs() < 1e-12,
                    "Q[{state}][{action}]: expected {want}, stored {got}"
                );
            }
        }
    }

    #[test]
    fn result_rates_for_empty_counters() {
        let result = TrainingResult::new(EpisodeCounters::default());
        assert_eq!(result.total_games, 0);
        assert_eq!(result.tie_rate, 0.0);
    }
}
