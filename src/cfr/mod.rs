//! CFR (Counterfactual Regret Minimization) Solver Module.
//!
//! This module computes an approximate Nash equilibrium for Kuhn Poker with
//! vanilla CFR, sampling one deal per traversal.
//!
//! # Overview
//!
//! CFR is an iterative algorithm that converges to Nash equilibrium by:
//! 1. Computing counterfactual regret for each action at each decision point
//! 2. Updating strategies to minimize regret over time
//! 3. Averaging strategies across iterations to converge to equilibrium
//!
//! # Usage
//!
//! 1. Create a [`Trainer`] from a [`TrainConfig`]
//! 2. Call `train()` to run iterations
//! 3. Read the equilibrium approximation with `average_strategies()`
//! 4. Measure it with [`Evaluator`] playouts or exactly with [`exploitability()`]
//!
//! # Example
//!
//! ```
//! use kuhn_cfr::cfr::{exploitability, TrainConfig, Trainer};
//!
//! let mut trainer = Trainer::new(TrainConfig::default().with_seed(42));
//! trainer.train(2_000);
//!
//! let profiles = trainer.average_strategies();
//! println!("P0 J opening: {:?}", profiles[0][0]);
//!
//! let exploit = exploitability(trainer.game(), trainer.tables());
//! assert!(exploit < 0.2);
//! ```
//!
//! # Theory
//!
//! **Regret**: The difference between the value of an action and the value of the current strategy.
//! ```text
//! Regret(a) = Value(a) - Value(current_strategy)
//! ```
//!
//! **Regret Matching**: Set strategy proportional to positive regrets.
//! ```text
//! Strategy(a) = max(0, Regret(a)) / sum(max(0, Regret(a')))
//! ```
//!
//! **Convergence**: Average regret decreases as O(1/sqrt(T)), and the average strategy
//! converges to Nash equilibrium.
//!
//! # References
//!
//! - Kuhn, H. W. "A Simplified Two-Person Poker" (1950)
//! - Zinkevich, M., et al. "Regret Minimization in Games with Incomplete Information" (2007)

pub mod config;
pub mod evaluator;
pub mod exploitability;
pub mod solver;
pub mod storage;
pub mod trainer;

// Re-export main types for convenient access
pub use config::{ConfigError, EvalPolicy, StrategySumMode, TrainConfig, TrainStats};
pub use evaluator::{sample_action, EvalReport, Evaluator};
pub use exploitability::{best_response_value, exploitability, game_value};
pub use solver::{counterfactual_regrets, expected_utility, CFRSolver};
pub use storage::{Strategy, StrategyProfile, StrategyTable};
pub use trainer::{solve, Trainer};
