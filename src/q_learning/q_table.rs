//! Q-table implementation for temporal difference learning

use std::collections::HashMap;

use tracing::warn;

use crate::tictactoe::StateEncoding;

/// Action values for one state, indexed by cell (`row * 3 + col`)
pub type ActionValues = [f64; 9];

/// Q-table mapping every board encoding to nine action values.
///
/// All 3^9 encodings are inserted up front, so lookups never miss in normal
/// operation. Values for occupied cells are stored but never selected.
#[derive(Debug, Clone)]
pub struct QTable {
    q_values: HashMap<StateEncoding, ActionValues>,
    /// Learning rate α
    learning_rate: f64,
    /// Discount factor γ
    discount_factor: f64,
}

impl QTable {
    /// Create a table with a zero row for every encoding
    pub fn new(learning_rate: f64, discount_factor: f64) -> Self {
        let q_values = StateEncoding::all().map(|s| (s, [0.0; 9])).collect();
        Self {
            q_values,
            learning_rate,
            discount_factor,
        }
    }

    /// Action values for a state.
    ///
    /// A missing row reads as zeros and is reported, since full
    /// pre-initialization should make it impossible.
    pub fn values(&self, state: StateEncoding) -> ActionValues {
        match self.q_values.get(&state) {
            Some(values) => *values,
            None => {
                warn!(%state, "Q-table row missing; reading zeros");
                [0.0; 9]
            }
        }
    }

    /// Get Q-value for a state-action pair
    pub fn get(&self, state: StateEncoding, action: usize) -> f64 {
        self.values(state)[action]
    }

    /// Set Q-value for a state-action pair
    pub fn set(&mut self, state: StateEncoding, action: usize, value: f64) {
        self.row_mut(state)[action] = value;
    }

    /// Maximum over all nine stored values of a state
    pub fn max_value(&self, state: StateEncoding) -> f64 {
        self.values(state)
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Q-learning update: off-policy TD(0) control
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    ///
    /// On a terminal transition the successor term is dropped:
    /// Q(s,a) ← Q(s,a) + α[r - Q(s,a)]
    pub fn q_learning_update(
        &mut self,
        state: StateEncoding,
        action: usize,
        reward: f64,
        next_state: StateEncoding,
        done: bool,
    ) -> f64 {
        let td_target = if done {
            reward
        } else {
            reward + self.discount_factor * self.max_value(next_state)
        };
        let current_q = self.get(state, action);
        let new_q = current_q + self.learning_rate * (td_target - current_q);
        self.set(state, action, new_q);
        new_q
    }

    /// Number of stored states
    pub fn size(&self) -> usize {
        self.q_values.len()
    }

    fn row_mut(&mut self, state: StateEncoding) -> &mut ActionValues {
        self.q_values.entry(state).or_insert_with(|| {
            warn!(%state, "Q-table row missing; inserting zeros");
            [0.0; 9]
        })
    }

    #[cfg(test)]
    fn remove(&mut self, state: StateEncoding) {
        self.q_values.remove(&state);
    }
}
