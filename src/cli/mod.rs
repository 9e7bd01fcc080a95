//! CLI infrastructure for the tic-tac-toe agents
//!
//! This module provides the command-line interface for self-play training,
//! matches between baseline players, and single-position minimax queries.

pub mod commands;
pub mod config;
pub mod output;
