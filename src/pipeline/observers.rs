//! Observer implementations for training runs and matches
//!
//! Observers allow composable data collection without coupling the drivers
//! to specific output formats.

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    ports::Observer,
    tictactoe::{BoardState, EpisodeCounters, GameOutcome, Player, Position},
};

/// Progress bar observer - Shows game progress with a running X/O/tie tally
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    counters: EpisodeCounters,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            counters: EpisodeCounters::default(),
        }
    }

    fn tally(&self) -> String {
        format!(
            "{} O:{} T:{}",
            self.counters.x_wins, self.counters.o_wins, self.counters.ties
        )
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_games: usize) -> Result<()> {
        let pb = ProgressBar::new(total_games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games (X:{msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, outcome: GameOutcome) -> Result<()> {
        self.counters.record(outcome);

        if let Some(pb) = &self.progress_bar {
            pb.set_position(game_num as u64 + 1);
            pb.set_message(self.tally());
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.tally());
        }
        Ok(())
    }
}

/// Metrics observer - Tracks outcome rates and game length
pub struct MetricsObserver {
    counters: EpisodeCounters,
    move_counts: Vec<usize>,
    opening_moves: [usize; 9],
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self {
            counters: EpisodeCounters::default(),
            move_counts: Vec::new(),
            opening_moves: [0; 9],
        }
    }

    fn rate(&self, count: usize) -> f64 {
        let total = self.counters.total();
        if total == 0 {
            0.0
        } else {
            count as f64 / total as f64
        }
    }

    pub fn x_win_rate(&self) -> f64 {
        self.rate(self.counters.x_wins)
    }

    pub fn o_win_rate(&self) -> f64 {
        self.rate(self.counters.o_wins)
    }

    pub fn tie_rate(&self) -> f64 {
        self.rate(self.counters.ties)
    }

    /// Get average game length in plies
    pub fn avg_game_length(&self) -> f64 {
        if self.move_counts.is_empty() {
            0.0
        } else {
            self.move_counts.iter().sum::<usize>() as f64 / self.move_counts.len() as f64
        }
    }

    /// How often each cell was chosen as the opening move, row-major
    pub fn opening_moves(&self) -> [usize; 9] {
        self.opening_moves
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_games: self.counters.total(),
            x_wins: self.counters.x_wins,
            o_wins: self.counters.o_wins,
            ties: self.counters.ties,
            x_win_rate: self.x_win_rate(),
            o_win_rate: self.o_win_rate(),
            tie_rate: self.tie_rate(),
            avg_game_length: self.avg_game_length(),
        }
    }
}

/// Summary of collected metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_games: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub ties: usize,
    pub x_win_rate: f64,
    pub o_win_rate: f64,
    pub tie_rate: f64,
    pub avg_game_length: f64,
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for MetricsObserver {
    fn on_game_start(&mut self, _game_num: usize) -> Result<()> {
        self.move_counts.push(0);
        Ok(())
    }

    fn on_move(
        &mut self,
        _game_num: usize,
        step_num: usize,
        _board: &BoardState,
        _player: Player,
        position: Position,
        _reward: f64,
    ) -> Result<()> {
        if step_num == 0 {
            self.opening_moves[position.index()] += 1;
        }
        if let Some(last) = self.move_counts.last_mut() {
            *last += 1;
        }
        Ok(())
    }

    fn on_game_end(&mut self, _game_num: usize, outcome: GameOutcome) -> Result<()> {
        self.counters.record(outcome);
        Ok(())
    }
}
