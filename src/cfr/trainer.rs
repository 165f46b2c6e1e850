//! Self-play training loop.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::cfr::config::{TrainConfig, TrainStats};
use crate::cfr::evaluator::{EvalReport, Evaluator};
use crate::cfr::solver::CFRSolver;
use crate::cfr::storage::{StrategyProfile, StrategyTable};
use crate::games::kuhn::{KuhnPoker, NUM_PLAYERS};

/// Drives CFR self-play and owns everything that persists across iterations.
///
/// Each iteration deals a fresh hand for each traverser and walks it once,
/// so both tables accumulate over the whole run. There is no convergence
/// check: the caller picks the iteration count.
///
/// # Example
/// ```
/// use kuhn_cfr::cfr::{TrainConfig, Trainer};
///
/// let mut trainer = Trainer::new(TrainConfig::default().with_seed(42));
/// trainer.train(1_000);
/// let strategies = trainer.average_strategies();
/// assert_eq!(strategies.len(), 2);
/// ```
pub struct Trainer {
    /// The rules.
    game: KuhnPoker,

    /// Configuration for the run.
    config: TrainConfig,

    /// One table per player.
    tables: [StrategyTable; NUM_PLAYERS],

    /// Current iteration count.
    iteration: u64,

    /// Statistics tracking.
    stats: TrainStats,

    /// Random number generator shared by dealing and evaluation.
    rng: StdRng,
}

impl Trainer {
    /// Create a trainer with zeroed tables.
    pub fn new(config: TrainConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            game: KuhnPoker::new(),
            config,
            tables: [StrategyTable::new(), StrategyTable::new()],
            iteration: 0,
            stats: TrainStats::new(),
            rng,
        }
    }

    /// Run a single iteration: one freshly dealt traversal per player.
    pub fn run_iteration(&mut self) {
        self.iteration += 1;

        for traverser in 0..NUM_PLAYERS {
            let state = self.game.deal_cards(&self.game.reset(), &mut self.rng);
            let mut solver =
                CFRSolver::new(&self.game, &mut self.tables, self.config.strategy_sum_mode);
            solver.cfr(&state, traverser, false, [1.0; NUM_PLAYERS]);
        }
    }

    /// Train for the configured number of iterations.
    pub fn train_configured(&mut self) -> &TrainStats {
        self.train(self.config.iterations)
    }

    /// Train for a specified number of iterations.
    pub fn train(&mut self, iterations: u64) -> &TrainStats {
        self.train_with_callback(iterations, self.config.progress_interval, |_| {})
    }

    /// Train with a callback for progress tracking.
    ///
    /// # Arguments
    /// * `iterations` - Number of iterations to run
    /// * `callback_interval` - How often to call the callback
    /// * `callback` - Function called every `callback_interval` iterations
    pub fn train_with_callback<F>(
        &mut self,
        iterations: u64,
        callback_interval: u64,
        mut callback: F,
    ) -> &TrainStats
    where
        F: FnMut(&TrainStats),
    {
        let start_time = Instant::now();
        let base_elapsed = self.stats.elapsed_seconds;
        let callback_interval = callback_interval.max(1);
        let log_interval = (iterations / 10).max(1);

        log::info!("training for {} iterations", iterations);

        for i in 0..iterations {
            self.run_iteration();

            if (i + 1) % log_interval == 0 {
                log::info!("iteration {}/{} completed", i + 1, iterations);
            }
            if (i + 1) % callback_interval == 0 {
                self.record_stats(base_elapsed, start_time);
                callback(&self.stats);
            }
        }

        self.record_stats(base_elapsed, start_time);
        log::debug!(
            "trained {} iterations in {:.2}s ({:.0} it/s)",
            self.stats.iterations,
            self.stats.elapsed_seconds,
            self.stats.iterations_per_second
        );

        &self.stats
    }

    /// Elapsed time accumulates across calls to `train`.
    fn record_stats(&mut self, base_elapsed: f64, start_time: Instant) {
        self.stats.iterations = self.iteration;
        self.stats.elapsed_seconds = base_elapsed + start_time.elapsed().as_secs_f64();
        self.stats.update_rate();
    }

    /// Play the configured number of evaluation hands with this trainer's RNG.
    pub fn evaluate(&mut self) -> EvalReport {
        let evaluator = Evaluator::new(self.config.eval_policy);
        evaluator.evaluate(&self.tables, self.config.eval_hands, &mut self.rng)
    }

    /// Average strategy of each player.
    pub fn average_strategies(&self) -> [StrategyProfile; NUM_PLAYERS] {
        [
            self.tables[0].average_strategy(),
            self.tables[1].average_strategy(),
        ]
    }

    /// Get the current iteration count.
    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    /// Get current statistics.
    pub fn stats(&self) -> &TrainStats {
        &self.stats
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    /// Get reference to the game.
    pub fn game(&self) -> &KuhnPoker {
        &self.game
    }

    /// Both players' tables.
    pub fn tables(&self) -> &[StrategyTable; NUM_PLAYERS] {
        &self.tables
    }

    /// Consume the trainer, keeping the tables.
    pub fn into_tables(self) -> [StrategyTable; NUM_PLAYERS] {
        self.tables
    }
}

/// Train for `iterations` from a fixed seed and return both tables.
pub fn solve(iterations: u64, seed: u64) -> [StrategyTable; NUM_PLAYERS] {
    let config = TrainConfig::default()
        .with_iterations(iterations)
        .with_seed(seed);
    let mut trainer = Trainer::new(config);
    trainer.train_configured();
    trainer.into_tables()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfr::config::StrategySumMode;
    use crate::games::kuhn::NUM_INFOSETS;
    use approx::assert_relative_eq;

    #[test]
    fn test_iteration_count_and_callbacks() {
        let mut trainer = Trainer::new(TrainConfig::default().with_seed(1));
        let mut seen = Vec::new();
        trainer.train_with_callback(50, 10, |stats| seen.push(stats.iterations));
        assert_eq!(seen, vec![10, 20, 30, 40, 50]);
        assert_eq!(trainer.iteration(), 50);
        assert_eq!(trainer.stats().iterations, 50);

        trainer.train(5);
        assert_eq!(trainer.iteration(), 55);
    }

    #[test]
    fn test_train_configured_runs_config_iterations() {
        let config = TrainConfig::default().with_seed(4).with_iterations(120);
        let mut configured = Trainer::new(config.clone());
        assert_eq!(configured.train_configured().iterations, 120);

        let mut explicit = Trainer::new(config);
        explicit.train(120);
        assert_eq!(configured.tables(), explicit.tables());
    }

    #[test]
    fn test_same_seed_same_tables() {
        assert_eq!(solve(300, 9), solve(300, 9));
        assert_ne!(solve(300, 9), solve(300, 10));
    }

    #[test]
    fn test_tables_accumulate_across_calls() {
        let mut split = Trainer::new(TrainConfig::default().with_seed(5));
        split.train(100);
        split.train(100);

        let mut whole = Trainer::new(TrainConfig::default().with_seed(5));
        whole.train(200);

        assert_eq!(split.tables(), whole.tables());
    }

    #[test]
    fn test_average_strategies_normalized() {
        let mut trainer = Trainer::new(TrainConfig::default().with_seed(3));
        for profile in trainer.average_strategies() {
            assert_eq!(profile, [[0.5, 0.5]; NUM_INFOSETS]);
        }
        for _ in 0..5 {
            trainer.train(40);
            for profile in trainer.average_strategies() {
                for row in profile {
                    assert_relative_eq!(row.iter().sum::<f64>(), 1.0, epsilon = 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_strategy_sum_modes_agree_on_average() {
        let config = TrainConfig::default().with_seed(21);
        let mut per_action = Trainer::new(config.clone());
        let mut per_node =
            Trainer::new(config.with_strategy_sum_mode(StrategySumMode::PerNode));
        per_action.train(500);
        per_node.train(500);

        let a = per_action.average_strategies();
        let b = per_node.average_strategies();
        for player in 0..NUM_PLAYERS {
            for infoset in 0..NUM_INFOSETS {
                assert_relative_eq!(a[player][infoset][1], b[player][infoset][1], epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_converges_toward_equilibrium_structure() {
        let tables = solve(20_000, 42);
        let p0 = tables[0].average_strategy();
        let p1 = tables[1].average_strategy();

        // P0 with J opening: bluffs sometimes, never always
        let jack_bluff = p0[0][1];
        assert!(
            jack_bluff > 0.0 && jack_bluff < 0.5,
            "J opening bet probability {} should be a partial bluff",
            jack_bluff
        );

        // P0 with K facing check-bet always calls
        assert!(p0[5][1] > 0.9, "P0 K should call: {:?}", p0[5]);

        // P1 with K bets after a check and calls a bet
        assert!(p1[4][1] > 0.9, "P1 K should bet after check: {:?}", p1[4]);
        assert!(p1[5][1] > 0.9, "P1 K should call: {:?}", p1[5]);

        // P1 with J folds to a bet, P1 with Q checks behind
        assert!(p1[1][1] < 0.1, "P1 J should fold: {:?}", p1[1]);
        assert!(p1[2][1] < 0.1, "P1 Q should check: {:?}", p1[2]);
    }

    #[test]
    fn test_evaluate_uses_config_hands() {
        let mut trainer = Trainer::new(
            TrainConfig::default()
                .with_seed(8)
                .with_eval_hands(250),
        );
        trainer.train(100);
        let report = trainer.evaluate();
        assert_eq!(report.hands, 250);
        assert_eq!(report.total_payoffs[0], -report.total_payoffs[1]);
    }
}
