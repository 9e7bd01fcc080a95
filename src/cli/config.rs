//! Configuration files and shared argument parsing for CLI commands

use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result, anyhow};

use crate::{q_learning::QLearningConfig, tictactoe::Player};

/// Load Q-learning hyperparameters from a JSON file.
///
/// Missing fields take their defaults, so `{"episodes": 5000}` is a valid
/// file.
pub fn load_q_learning_config(path: &Path) -> Result<QLearningConfig> {
    let file = File::open(path)
        .with_context(|| format!("failed to open config file {}", path.display()))?;
    let config: QLearningConfig = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    Ok(config)
}

/// Parse a seat token (`x` or `o`, case-insensitive)
pub fn parse_player_token(value: &str, flag: &str) -> Result<Player> {
    match value.trim().to_ascii_lowercase().as_str() {
        "x" => Ok(Player::X),
        "o" => Ok(Player::O),
        other => Err(anyhow!(
            "Invalid value '{other}' for {flag} (expected 'x' or 'o')"
        )),
    }
}
