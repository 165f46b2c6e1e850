//! Error types for the solver.

use thiserror::Error;

use crate::cfr::config::ConfigError;

/// Errors raised at the boundaries of the solver.
///
/// The training and evaluation loops themselves are total over well-formed
/// inputs; these variants cover malformed actions, deals and configuration.
#[derive(Error, Debug)]
pub enum KuhnError {
    /// Action index outside {0, 1}.
    #[error("Invalid action: {0} (expected 0 for pass/check or 1 for bet/call)")]
    InvalidAction(usize),

    /// Card rank outside 1..=3.
    #[error("Invalid card rank: {0} (expected 1, 2 or 3)")]
    InvalidRank(u8),

    /// Both players were dealt the same card.
    #[error("Both players dealt rank {0}")]
    DuplicateRank(u8),

    /// Configuration failed validation.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Reading a configuration file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for crate operations.
pub type Result<T> = std::result::Result<T, KuhnError>;
