//! Environment configuration.
//!
//! Harnesses provide an `EnvConfig` when constructing the environment:
//! - `seed`: fixes the dice sequence for reproducible episodes
//! - `truncation_penalty`: reward returned when an illegal action ends the episode

use serde::{Deserialize, Serialize};

/// Default reward for an illegal action.
pub const DEFAULT_TRUNCATION_PENALTY: f64 = -1000.0;

/// Complete environment configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    /// RNG seed. `None` draws a seed from OS entropy.
    pub seed: Option<u64>,

    /// Reward for an action that truncates the episode. Should be negative.
    pub truncation_penalty: f64,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            seed: None,
            truncation_penalty: DEFAULT_TRUNCATION_PENALTY,
        }
    }
}

impl EnvConfig {
    /// Create a default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the truncation penalty.
    #[must_use]
    pub fn with_truncation_penalty(mut self, penalty: f64) -> Self {
        assert!(penalty.is_finite(), "Truncation penalty must be finite");
        self.truncation_penalty = penalty;
        self
    }
}
