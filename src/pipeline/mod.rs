//! Training and evaluation pipeline
//!
//! This module provides:
//! - Q-learning self-play training
//! - Matches between any two learners
//! - Observers for progress and metrics

pub mod comparison;
pub mod observers;
pub mod training;

pub use comparison::{MatchResult, MatchRunner, MinimaxLearner, RandomLearner};
pub use observers::{MetricsObserver, MetricsSummary, ProgressObserver};
pub use training::{SelfPlayDriver, TrainingResult};

pub use crate::ports::{Learner, Observer};
