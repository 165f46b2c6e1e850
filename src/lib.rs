//! # Kuhn CFR
//!
//! Counterfactual Regret Minimization (CFR) for Kuhn Poker: a pure rule
//! engine, per-player regret-matching tables, the recursive CFR walk that
//! ties them together, and Monte Carlo and exact evaluation of the result.
//!
//! ## Quick Start
//!
//! ```
//! use kuhn_cfr::cfr::{TrainConfig, Trainer};
//!
//! let mut trainer = Trainer::new(TrainConfig::default().with_seed(42).with_eval_hands(1_000));
//! trainer.train(1_000);
//!
//! for (player, profile) in trainer.average_strategies().iter().enumerate() {
//!     println!("Player {} average strategy: {:?}", player, profile);
//! }
//!
//! let report = trainer.evaluate();
//! assert_eq!(report.total_payoffs[0], -report.total_payoffs[1]);
//! ```
//!
//! ## Modules
//!
//! - [`cfr`]: Strategy tables, the CFR walk, training and evaluation
//! - [`games`]: The Kuhn Poker rule engine
//! - [`error`]: Error type shared by the crate
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 Trainer / Evaluator                      │
//! │  - fresh deal per traversal   - sampled playouts         │
//! └──────────────────────────────────────────────────────────┘
//!                │                            │
//!                ▼                            ▼
//!        ┌──────────────┐           ┌──────────────────┐
//!        │  CFRSolver   │──────────▶│ StrategyTable x2 │
//!        └──────────────┘           └──────────────────┘
//!                │
//!                ▼
//!        ┌──────────────┐
//!        │  KuhnPoker   │  reset / deal / step / payoffs / info_set
//!        └──────────────┘
//! ```

#![warn(missing_docs)]

/// CFR (Counterfactual Regret Minimization) solver module.
pub mod cfr;

/// Error types.
pub mod error;

/// Game implementations module.
pub mod games;

// Re-export commonly used types at crate root for convenience
pub use cfr::{EvalPolicy, StrategySumMode, StrategyTable, TrainConfig, Trainer};
pub use error::{KuhnError, Result};
pub use games::kuhn::{GameState, KuhnAction, KuhnPoker};
