//! Per-player storage for CFR regrets and strategies.
//!
//! Kuhn Poker has a fixed, tiny set of information sets, so each player's
//! cumulative regrets and strategy sums live in dense `[infoset][action]`
//! tables rather than a keyed map.

use crate::games::kuhn::{NUM_ACTIONS, NUM_INFOSETS};

/// A probability distribution over the two actions.
pub type Strategy = [f64; NUM_ACTIONS];

/// One strategy per information set.
pub type StrategyProfile = [Strategy; NUM_INFOSETS];

const UNIFORM: Strategy = [1.0 / NUM_ACTIONS as f64; NUM_ACTIONS];

/// Regret and strategy accumulators for one player.
///
/// This struct manages the core data structures used by CFR:
/// - **Regrets**: Cumulative counterfactual regret for each action at each info set
/// - **Strategy sums**: Cumulative reach-weighted strategy for computing the average strategy
///
/// A table belongs to exactly one player for the whole training run and is
/// only mutated through [`update_regrets`](Self::update_regrets) and
/// [`update_strategy_sum`](Self::update_strategy_sum).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrategyTable {
    /// Cumulative regrets, may be negative.
    regret_sum: [[f64; NUM_ACTIONS]; NUM_INFOSETS],

    /// Cumulative strategy weights, never negative.
    strategy_sum: [[f64; NUM_ACTIONS]; NUM_INFOSETS],
}

impl StrategyTable {
    /// Create a zeroed table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get current strategy for an info set using regret matching.
    ///
    /// The strategy is proportional to positive regrets. If no regret is
    /// positive, returns the uniform strategy.
    pub fn current_strategy(&self, infoset: usize) -> Strategy {
        let positive = self.regret_sum[infoset].map(|r| r.max(0.0));
        normalize(positive)
    }

    /// Get average strategy for an info set (Nash equilibrium approximation).
    pub fn average_strategy_at(&self, infoset: usize) -> Strategy {
        normalize(self.strategy_sum[infoset])
    }

    /// Average strategy for every info set.
    ///
    /// Rows that were never reached stay uniform.
    pub fn average_strategy(&self) -> StrategyProfile {
        std::array::from_fn(|infoset| self.average_strategy_at(infoset))
    }

    /// Add `regrets * reach_prob` to the cumulative regrets of an info set.
    ///
    /// Regrets are not clamped here; negative values only get clipped when
    /// a strategy is derived.
    pub fn update_regrets(&mut self, infoset: usize, regrets: &Strategy, reach_prob: f64) {
        for (sum, &regret) in self.regret_sum[infoset].iter_mut().zip(regrets) {
            *sum += regret * reach_prob;
        }
    }

    /// Add `strategy * reach_prob` to the strategy sum of an info set.
    pub fn update_strategy_sum(&mut self, infoset: usize, strategy: &Strategy, reach_prob: f64) {
        for (sum, &prob) in self.strategy_sum[infoset].iter_mut().zip(strategy) {
            *sum += prob * reach_prob;
        }
    }

    /// Cumulative regrets, for inspection.
    pub fn regret_sum(&self) -> &[[f64; NUM_ACTIONS]; NUM_INFOSETS] {
        &self.regret_sum
    }

    /// Cumulative strategy sums, for inspection.
    pub fn strategy_sum(&self) -> &[[f64; NUM_ACTIONS]; NUM_INFOSETS] {
        &self.strategy_sum
    }
}

/// Scale non-negative weights to a distribution, uniform when they sum to 0.
fn normalize(weights: Strategy) -> Strategy {
    let total: f64 = weights.iter().sum();
    if total > 0.0 {
        weights.map(|w| w / total)
    } else {
        UNIFORM
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fresh_table_is_uniform() {
        let table = StrategyTable::new();
        for infoset in 0..NUM_INFOSETS {
            assert_eq!(table.current_strategy(infoset), [0.5, 0.5]);
        }
        assert_eq!(table.average_strategy(), [[0.5, 0.5]; NUM_INFOSETS]);
    }

    #[test]
    fn test_regret_matching_proportional_to_positive_regret() {
        let mut table = StrategyTable::new();
        table.update_regrets(2, &[1.0, 3.0], 1.0);
        let strategy = table.current_strategy(2);
        assert_relative_eq!(strategy[0], 0.25);
        assert_relative_eq!(strategy[1], 0.75);

        // Other rows untouched
        assert_eq!(table.current_strategy(3), [0.5, 0.5]);
    }

    #[test]
    fn test_negative_regret_clipped_only_when_matching() {
        let mut table = StrategyTable::new();
        table.update_regrets(0, &[-2.0, 1.0], 0.5);
        assert_eq!(table.regret_sum()[0], [-1.0, 0.5]);
        assert_eq!(table.current_strategy(0), [0.0, 1.0]);

        // All non-positive falls back to uniform
        table.update_regrets(0, &[0.0, -4.0], 1.0);
        assert_eq!(table.regret_sum()[0], [-1.0, -3.5]);
        assert_eq!(table.current_strategy(0), [0.5, 0.5]);
    }

    #[test]
    fn test_strategy_sum_weighted_by_reach() {
        let mut table = StrategyTable::new();
        table.update_strategy_sum(4, &[0.2, 0.8], 0.5);
        table.update_strategy_sum(4, &[0.6, 0.4], 1.0);
        let sums = table.strategy_sum()[4];
        assert_relative_eq!(sums[0], 0.7, epsilon = 1e-12);
        assert_relative_eq!(sums[1], 0.8, epsilon = 1e-12);

        let avg = table.average_strategy_at(4);
        assert_relative_eq!(avg[0], 0.7 / 1.5, epsilon = 1e-12);
        assert_relative_eq!(avg[1], 0.8 / 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_reach_leaves_average_uniform() {
        let mut table = StrategyTable::new();
        table.update_strategy_sum(1, &[1.0, 0.0], 0.0);
        assert_eq!(table.average_strategy_at(1), [0.5, 0.5]);
    }

    #[test]
    fn test_rows_always_normalized() {
        let mut table = StrategyTable::new();
        let updates = [
            (0, [0.3, -0.1]),
            (1, [-5.0, 2.5]),
            (5, [7.0, 7.0]),
            (3, [-1.0, -1.0]),
        ];
        for (infoset, regrets) in updates {
            table.update_regrets(infoset, &regrets, 0.75);
            let strategy = table.current_strategy(infoset);
            table.update_strategy_sum(infoset, &strategy, 0.75);
        }
        for infoset in 0..NUM_INFOSETS {
            let current: f64 = table.current_strategy(infoset).iter().sum();
            let average: f64 = table.average_strategy_at(infoset).iter().sum();
            assert_relative_eq!(current, 1.0, epsilon = 1e-12);
            assert_relative_eq!(average, 1.0, epsilon = 1e-12);
        }
    }
}
