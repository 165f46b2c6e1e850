//! Monte Carlo self-play evaluation.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cfr::config::EvalPolicy;
use crate::cfr::storage::{Strategy, StrategyTable};
use crate::games::kuhn::{KuhnAction, KuhnPoker, NUM_PLAYERS};

/// Aggregate result of an evaluation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalReport {
    /// Hands played.
    pub hands: u64,
    /// Sum of each player's payoffs.
    pub total_payoffs: [i64; NUM_PLAYERS],
    /// Mean payoff per hand for each player.
    pub mean_payoffs: [f64; NUM_PLAYERS],
}

/// Plays sampled hands between two strategy tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    game: KuhnPoker,
    policy: EvalPolicy,
}

impl Evaluator {
    /// Create an evaluator sampling from the given policy.
    pub fn new(policy: EvalPolicy) -> Self {
        Self {
            game: KuhnPoker::new(),
            policy,
        }
    }

    /// Play `hands` independent hands and report mean payoffs.
    pub fn evaluate<R: Rng>(
        &self,
        tables: &[StrategyTable; NUM_PLAYERS],
        hands: u64,
        rng: &mut R,
    ) -> EvalReport {
        let mut total_payoffs = [0i64; NUM_PLAYERS];

        for _ in 0..hands {
            let payoffs = self.play_hand(tables, rng);
            for (total, payoff) in total_payoffs.iter_mut().zip(payoffs) {
                *total += i64::from(payoff);
            }
        }

        let mean_payoffs = if hands > 0 {
            total_payoffs.map(|total| total as f64 / hands as f64)
        } else {
            [0.0; NUM_PLAYERS]
        };

        log::info!(
            "average payoff over {} games: player 0: {:.4}, player 1: {:.4}",
            hands,
            mean_payoffs[0],
            mean_payoffs[1]
        );

        EvalReport {
            hands,
            total_payoffs,
            mean_payoffs,
        }
    }

    /// Deal and play one hand to completion, returning the payoffs.
    pub fn play_hand<R: Rng>(
        &self,
        tables: &[StrategyTable; NUM_PLAYERS],
        rng: &mut R,
    ) -> [i32; NUM_PLAYERS] {
        let mut state = self.game.deal_cards(&self.game.reset(), rng);

        loop {
            let player = state.active_player;
            let infoset = self.game.info_set(&state, player);
            let strategy = self.strategy(&tables[player], infoset);
            let action = sample_action(&strategy, rng);

            let (next, terminal) = self.game.step(&state, action);
            state = next;
            if terminal {
                return self.game.payoffs(&state);
            }
        }
    }

    fn strategy(&self, table: &StrategyTable, infoset: usize) -> Strategy {
        match self.policy {
            EvalPolicy::Current => table.current_strategy(infoset),
            EvalPolicy::Average => table.average_strategy_at(infoset),
        }
    }
}

/// Sample an action according to a probability distribution.
pub fn sample_action<R: Rng>(strategy: &Strategy, rng: &mut R) -> KuhnAction {
    let r: f64 = rng.gen();
    let mut cumsum = 0.0;

    for action in KuhnAction::ALL {
        cumsum += strategy[action.index()];
        if r < cumsum {
            return action;
        }
    }

    // Fallback to last action (handles floating point imprecision)
    KuhnAction::Bet
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfr::trainer::solve;
    use crate::games::kuhn::NUM_INFOSETS;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sample_action_respects_pure_strategies() {
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..100 {
            assert_eq!(sample_action(&[1.0, 0.0], &mut rng), KuhnAction::Pass);
            assert_eq!(sample_action(&[0.0, 1.0], &mut rng), KuhnAction::Bet);
        }
    }

    #[test]
    fn test_sample_action_frequency() {
        let mut rng = StdRng::seed_from_u64(1);
        let bets = (0..10_000)
            .filter(|_| sample_action(&[0.25, 0.75], &mut rng) == KuhnAction::Bet)
            .count();
        assert!((7_200..7_800).contains(&bets), "bets = {}", bets);
    }

    #[test]
    fn test_evaluation_is_zero_sum_and_reproducible() {
        let tables = solve(500, 4);
        let evaluator = Evaluator::new(EvalPolicy::Current);

        let first = evaluator.evaluate(&tables, 2_000, &mut StdRng::seed_from_u64(12));
        let second = evaluator.evaluate(&tables, 2_000, &mut StdRng::seed_from_u64(12));
        assert_eq!(first, second);
        assert_eq!(first.hands, 2_000);
        assert_eq!(first.total_payoffs[0], -first.total_payoffs[1]);
        assert_eq!(first.mean_payoffs[0], -first.mean_payoffs[1]);
    }

    #[test]
    fn test_payoffs_bounded_per_hand() {
        let tables = [StrategyTable::new(), StrategyTable::new()];
        let evaluator = Evaluator::new(EvalPolicy::Average);
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..500 {
            let [p0, p1] = evaluator.play_hand(&tables, &mut rng);
            assert_eq!(p0, -p1);
            assert!([1, 2].contains(&p0.abs()));
        }
    }

    #[test]
    fn test_uniform_play_mean_near_exact_value() {
        // Uniform play is worth 0.125 per hand to player 0.
        let tables = [StrategyTable::new(), StrategyTable::new()];
        let evaluator = Evaluator::new(EvalPolicy::Current);
        let report = evaluator.evaluate(&tables, 40_000, &mut StdRng::seed_from_u64(3));
        assert!(
            (report.mean_payoffs[0] - 0.125).abs() < 0.05,
            "mean payoff {}",
            report.mean_payoffs[0]
        );
    }

    /// Regrets all on Pass, strategy sum all on Bet.
    fn split_table() -> StrategyTable {
        let mut table = StrategyTable::new();
        for infoset in 0..NUM_INFOSETS {
            table.update_regrets(infoset, &[1.0, 0.0], 1.0);
            table.update_strategy_sum(infoset, &[0.0, 1.0], 1.0);
        }
        table
    }

    #[test]
    fn test_policy_selects_strategy_source() {
        let table = split_table();
        for infoset in 0..NUM_INFOSETS {
            assert_eq!(Evaluator::new(EvalPolicy::Current).strategy(&table, infoset), [1.0, 0.0]);
            assert_eq!(Evaluator::new(EvalPolicy::Average).strategy(&table, infoset), [0.0, 1.0]);
        }
    }

    #[test]
    fn test_policy_changes_played_lines() {
        let tables = [split_table(), split_table()];
        let mut rng = StdRng::seed_from_u64(6);

        // Current: both always pass, so every hand is a check-check showdown
        let current = Evaluator::new(EvalPolicy::Current);
        for _ in 0..200 {
            let [p0, p1] = current.play_hand(&tables, &mut rng);
            assert_eq!(p0.abs(), 1);
            assert_eq!(p0, -p1);
        }

        // Average: P0 always bets and P1 always calls
        let average = Evaluator::new(EvalPolicy::Average);
        for _ in 0..200 {
            let [p0, p1] = average.play_hand(&tables, &mut rng);
            assert_eq!(p0.abs(), 2);
            assert_eq!(p0, -p1);
        }
    }

    #[test]
    fn test_zero_hands() {
        let tables = [StrategyTable::new(), StrategyTable::new()];
        let report = Evaluator::default().evaluate(&tables, 0, &mut StdRng::seed_from_u64(0));
        assert_eq!(report.total_payoffs, [0, 0]);
        assert_eq!(report.mean_payoffs, [0.0, 0.0]);
    }
}
