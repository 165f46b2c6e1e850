//! Configuration options for training and evaluation.
//!
//! This module provides configuration structs that control the training
//! loop, the evaluation playouts, and the two accumulation variants the
//! solver can run with.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::error::Result;

/// How often a decision node adds its strategy to the strategy sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategySumMode {
    /// Once per action enumerated at the node, so twice per visit.
    ///
    /// This scales every row of the strategy sum by the same factor and
    /// leaves the normalized average strategy unchanged.
    #[default]
    PerAction,
    /// Once per node visit (textbook CFR).
    PerNode,
}

/// Which strategy the evaluator samples actions from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvalPolicy {
    /// The current regret-matching strategy.
    #[default]
    Current,
    /// The average strategy, which is the one that approximates equilibrium.
    Average,
}

/// Configuration for a training run.
///
/// # Example
/// ```
/// use kuhn_cfr::cfr::{StrategySumMode, TrainConfig};
///
/// let config = TrainConfig::default().with_seed(42);
/// assert_eq!(config.strategy_sum_mode, StrategySumMode::PerAction);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    /// Iterations run by [`Trainer::train_configured`](crate::cfr::Trainer::train_configured);
    /// each runs one traversal per player.
    pub iterations: u64,

    /// Number of hands played by the evaluator.
    pub eval_hands: u64,

    /// Random seed for reproducibility.
    ///
    /// If set, dealing and evaluation sampling are reproducible. If `None`,
    /// the generator is seeded from entropy.
    pub seed: Option<u64>,

    /// Strategy-sum accumulation variant.
    pub strategy_sum_mode: StrategySumMode,

    /// Strategy sampled during evaluation.
    pub eval_policy: EvalPolicy,

    /// Iterations between progress callbacks.
    pub progress_interval: u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            iterations: 10_000,
            eval_hands: 10_000,
            seed: None,
            strategy_sum_mode: StrategySumMode::PerAction,
            eval_policy: EvalPolicy::Current,
            progress_interval: 100,
        }
    }
}

impl TrainConfig {
    /// Create a new TrainConfig with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set number of training iterations.
    pub fn with_iterations(mut self, iterations: u64) -> Self {
        self.iterations = iterations;
        self
    }

    /// Builder method: set number of evaluation hands.
    pub fn with_eval_hands(mut self, hands: u64) -> Self {
        self.eval_hands = hands;
        self
    }

    /// Builder method: set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder method: set the strategy-sum accumulation variant.
    pub fn with_strategy_sum_mode(mut self, mode: StrategySumMode) -> Self {
        self.strategy_sum_mode = mode;
        self
    }

    /// Builder method: set the evaluation policy.
    pub fn with_eval_policy(mut self, policy: EvalPolicy) -> Self {
        self.eval_policy = policy;
        self
    }

    /// Builder method: set iterations between progress callbacks.
    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Validate the configuration and return any errors.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        if self.eval_hands == 0 {
            return Err(ConfigError::ZeroHands);
        }
        if self.progress_interval == 0 {
            return Err(ConfigError::ZeroProgressInterval);
        }
        Ok(())
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}

/// Errors that can occur when validating a configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No training iterations requested.
    #[error("iterations must be positive")]
    ZeroIterations,

    /// No evaluation hands requested.
    #[error("evaluation hands must be positive")]
    ZeroHands,

    /// Progress interval of zero.
    #[error("progress interval must be positive")]
    ZeroProgressInterval,
}

/// Statistics tracked during training.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainStats {
    /// Total number of iterations completed.
    pub iterations: u64,

    /// Total time spent training (in seconds).
    pub elapsed_seconds: f64,

    /// Iterations per second.
    pub iterations_per_second: f64,
}

impl TrainStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update iterations per second based on elapsed time.
    pub fn update_rate(&mut self) {
        if self.elapsed_seconds > 0.0 {
            self.iterations_per_second = self.iterations as f64 / self.elapsed_seconds;
        }
    }
}
