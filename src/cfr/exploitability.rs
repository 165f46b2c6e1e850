//! Exact evaluation of average strategies.
//!
//! Kuhn Poker is small enough to evaluate in closed form: six equally likely
//! deals and at most three decisions per hand. Exploitability measures how
//! much value an optimal opponent could gain against the average strategies.
//! Lower is better; 0 means Nash equilibrium.

use crate::cfr::solver::expected_utility;
use crate::cfr::storage::{Strategy, StrategyProfile, StrategyTable};
use crate::games::kuhn::{KuhnPoker, NUM_INFOSETS, NUM_PLAYERS};

/// Expected payoff of `player` over all deals when both sides follow `policy`.
fn value_over_deals<F>(game: &KuhnPoker, player: usize, policy: &F) -> f64
where
    F: Fn(usize, usize) -> Strategy,
{
    let deals = KuhnPoker::deals();
    let root = game.reset();
    let total: f64 = deals
        .iter()
        .map(|&hands| {
            let state = game.with_hands(&root, hands);
            expected_utility(game, &state, false, player, policy)
        })
        .sum();
    total / deals.len() as f64
}

/// The deterministic strategy encoded by bit `infoset` of `mask`.
fn pure_strategy(mask: u32, infoset: usize) -> Strategy {
    if (mask >> infoset) & 1 == 1 {
        [0.0, 1.0]
    } else {
        [1.0, 0.0]
    }
}

/// Player 0's expected payoff when both players follow their average strategies.
pub fn game_value(game: &KuhnPoker, tables: &[StrategyTable; NUM_PLAYERS]) -> f64 {
    let profiles: [StrategyProfile; NUM_PLAYERS] =
        [tables[0].average_strategy(), tables[1].average_strategy()];
    value_over_deals(game, 0, &|player: usize, infoset: usize| profiles[player][infoset])
}

/// Best expected payoff `player` can reach against the opponent's average strategy.
///
/// A best response is always attained by some pure strategy, and a player
/// has only `2^6` of them, so they are enumerated directly.
pub fn best_response_value(
    game: &KuhnPoker,
    tables: &[StrategyTable; NUM_PLAYERS],
    player: usize,
) -> f64 {
    let opponent = tables[1 - player].average_strategy();

    (0..1u32 << NUM_INFOSETS)
        .map(|mask| {
            let policy = |acting: usize, infoset: usize| {
                if acting == player {
                    pure_strategy(mask, infoset)
                } else {
                    opponent[infoset]
                }
            };
            value_over_deals(game, player, &policy)
        })
        .fold(f64::NEG_INFINITY, f64::max)
}

/// Mean gain of a best response over each seat, in chips per hand.
pub fn exploitability(game: &KuhnPoker, tables: &[StrategyTable; NUM_PLAYERS]) -> f64 {
    let total: f64 = (0..NUM_PLAYERS)
        .map(|player| best_response_value(game, tables, player))
        .sum();
    total / NUM_PLAYERS as f64
}
