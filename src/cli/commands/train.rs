//! Train command - Q-learning self-play

use std::{
    fs::{self, File},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use serde::Serialize;
use serde_json::to_writer_pretty;
use tracing::info;

use crate::{
    cli::{
        config::load_q_learning_config,
        output::{format_number, print_kv, print_match_result, print_section, print_training_result},
    },
    pipeline::{
        MatchResult, MatchRunner, MetricsObserver, MetricsSummary, MinimaxLearner,
        ProgressObserver, SelfPlayDriver, TrainingResult,
    },
    q_learning::{QLearningConfig, QLearningPolicy},
};

#[derive(Debug, Serialize)]
struct TrainingSummaryFile {
    config: QLearningConfig,
    training: TrainingResult,
    metrics: MetricsSummary,
    evaluation: Option<MatchResult>,
    seed: Option<u64>,
}

fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    // Treat trailing separators or missing filename as a directory target.
    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("training_summary.json");
        return normalized;
    }

    if normalized.extension().is_none() {
        normalized.set_extension("json");
    }
    normalized
}

#[derive(Parser, Debug)]
#[command(about = "Train a Q-learning policy by self-play", allow_negative_numbers = true)]
pub struct TrainArgs {
    /// JSON file with hyperparameters; flags below override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Learning rate α (0, 1]
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Discount factor γ [0, 1]
    #[arg(long)]
    pub gamma: Option<f64>,

    /// Exploration rate ε [0, 1]
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Number of self-play episodes
    #[arg(long, short = 'n')]
    pub episodes: Option<usize>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Hide the progress bar
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Games of the greedy policy (as O) against minimax (as X) after training
    #[arg(long, default_value_t = 0)]
    pub evaluate_games: usize,
}

impl TrainArgs {
    /// Merge the config file, defaults and flag overrides
    pub fn resolve_config(&self) -> Result<QLearningConfig> {
        let mut config = match &self.config {
            Some(path) => load_q_learning_config(path)?,
            None => QLearningConfig::default(),
        };
        if let Some(alpha) = self.alpha {
            config = config.with_learning_rate(alpha);
        }
        if let Some(gamma) = self.gamma {
            config = config.with_discount_factor(gamma);
        }
        if let Some(epsilon) = self.epsilon {
            config = config.with_exploration_rate(epsilon);
        }
        if let Some(episodes) = self.episodes {
            config = config.with_episodes(episodes);
        }
        config
            .validate()
            .map_err(|e| anyhow!("invalid training configuration: {e}"))?;
        Ok(config)
    }
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let config = args.resolve_config()?;
    let policy = match args.seed {
        Some(seed) => QLearningPolicy::with_seed(config, seed),
        None => QLearningPolicy::new(config),
    }
    .context("failed to create Q-learning policy")?;

    print_section("Q-learning self-play");
    print_kv("Learning rate", &config.learning_rate.to_string());
    print_kv("Discount factor", &config.discount_factor.to_string());
    print_kv("Exploration rate", &config.exploration_rate.to_string());
    print_kv("Episodes", &format_number(config.episodes));
    if let Some(seed) = args.seed {
        print_kv("Seed", &seed.to_string());
    }

    let metrics = Arc::new(Mutex::new(MetricsObserver::new()));
    let mut driver = SelfPlayDriver::new(policy).with_observer(Box::new(Arc::clone(&metrics)));
    if !args.no_progress {
        driver = driver.with_observer(Box::new(ProgressObserver::new()));
    }

    let training = driver.run().context("self-play training failed")?;
    let metrics = metrics
        .lock()
        .map_err(|_| anyhow!("metrics observer lock was poisoned"))?
        .summary();

    print_section("Training results");
    print_training_result(&training);
    print_kv("Avg game length", &format!("{:.2}", metrics.avg_game_length));

    let evaluation = if args.evaluate_games > 0 {
        let mut policy = driver.into_policy();
        policy.set_exploration_rate(0.0)?;
        let mut minimax = MinimaxLearner::new("Minimax".to_string());

        info!(games = args.evaluate_games, "evaluating greedy policy against minimax");
        let result = MatchRunner::new()
            .run(&mut minimax, &mut policy, args.evaluate_games)
            .context("evaluation against minimax failed")?;

        print_section("Evaluation (greedy policy as O vs minimax as X)");
        print_match_result(&result);
        Some(result)
    } else {
        None
    };

    if let Some(raw) = &args.summary {
        let path = sanitize_summary_path(raw);
        write_summary(
            &path,
            &TrainingSummaryFile {
                config,
                training,
                metrics,
                evaluation,
                seed: args.seed,
            },
        )?;
        println!("\nSummary written to {}", path.display());
    }

    Ok(())
}

fn write_summary(path: &Path, summary: &TrainingSummaryFile) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    let file = File::create(path)
        .with_context(|| format!("failed to create summary file {}", path.display()))?;
    to_writer_pretty(file, summary)
        .with_context(|| format!("failed to write summary file {}", path.display()))?;
    Ok(())
}
