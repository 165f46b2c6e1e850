//! Counterfactual Regret Minimization tree walk.
//!
//! Each call to [`CFRSolver::cfr`] walks the full betting tree of one dealt
//! hand for a designated traverser. Every frame first computes the utility
//! of its children, then, only at the traverser's own decision points,
//! folds those utilities into the traverser's [`StrategyTable`].
//!
//! The pure pieces are exposed separately: [`counterfactual_regrets`] and
//! [`expected_utility`] never touch a table.

use crate::cfr::config::StrategySumMode;
use crate::cfr::storage::{Strategy, StrategyTable};
use crate::games::kuhn::{GameState, KuhnAction, KuhnPoker, NUM_ACTIONS, NUM_PLAYERS};

/// Recursive CFR over a pair of per-player tables.
///
/// The solver borrows the tables for the duration of a traversal; the
/// caller (normally the [`Trainer`](crate::cfr::Trainer)) owns them.
///
/// # Example
/// ```
/// use kuhn_cfr::cfr::{CFRSolver, StrategySumMode, StrategyTable};
/// use kuhn_cfr::games::kuhn::KuhnPoker;
///
/// let game = KuhnPoker::new();
/// let mut tables = [StrategyTable::new(), StrategyTable::new()];
/// let state = game.deal_fixed(&game.reset(), [3, 1]).unwrap();
///
/// let mut solver = CFRSolver::new(&game, &mut tables, StrategySumMode::PerAction);
/// let value = solver.cfr(&state, 0, false, [1.0, 1.0]);
/// assert!(value > 0.0);
/// ```
pub struct CFRSolver<'a> {
    /// The rules.
    game: &'a KuhnPoker,

    /// One table per player.
    tables: &'a mut [StrategyTable; NUM_PLAYERS],

    /// Strategy-sum accumulation variant.
    strategy_sum_mode: StrategySumMode,
}

impl<'a> CFRSolver<'a> {
    /// Create a solver over borrowed tables.
    pub fn new(
        game: &'a KuhnPoker,
        tables: &'a mut [StrategyTable; NUM_PLAYERS],
        strategy_sum_mode: StrategySumMode,
    ) -> Self {
        Self {
            game,
            tables,
            strategy_sum_mode,
        }
    }

    /// Expected payoff for `traverser` from `state` under the current strategies.
    ///
    /// `reach` holds each player's own contribution to the probability of
    /// reaching `state`. Only the traverser's table is updated.
    pub fn cfr(
        &mut self,
        state: &GameState,
        traverser: usize,
        terminal: bool,
        reach: [f64; NUM_PLAYERS],
    ) -> f64 {
        if terminal {
            return f64::from(self.game.payoffs(state)[traverser]);
        }

        let player = state.active_player;
        let infoset = self.game.info_set(state, player);
        let strategy = self.tables[player].current_strategy(infoset);

        let mut action_utils = [0.0; NUM_ACTIONS];
        let mut node_utility = 0.0;

        for action in KuhnAction::ALL {
            let a = action.index();
            let (child, child_terminal) = self.game.step(state, action);

            let mut child_reach = reach;
            child_reach[player] *= strategy[a];

            action_utils[a] = self.cfr(&child, traverser, child_terminal, child_reach);
            node_utility += strategy[a] * action_utils[a];
        }

        if player == traverser {
            self.accumulate(player, infoset, &strategy, &action_utils, node_utility, reach);
        }

        node_utility
    }

    /// Fold a node's utilities into the acting player's table.
    fn accumulate(
        &mut self,
        player: usize,
        infoset: usize,
        strategy: &Strategy,
        action_utils: &[f64; NUM_ACTIONS],
        node_utility: f64,
        reach: [f64; NUM_PLAYERS],
    ) {
        let regrets = counterfactual_regrets(action_utils, node_utility);
        let own_reach = reach[player];
        let opponent_reach = reach[1 - player];
        let table = &mut self.tables[player];

        for (a, &regret) in regrets.iter().enumerate() {
            let mut one_hot = [0.0; NUM_ACTIONS];
            one_hot[a] = regret;
            table.update_regrets(infoset, &one_hot, opponent_reach);

            if self.strategy_sum_mode == StrategySumMode::PerAction {
                table.update_strategy_sum(infoset, strategy, own_reach);
            }
        }

        if self.strategy_sum_mode == StrategySumMode::PerNode {
            table.update_strategy_sum(infoset, strategy, own_reach);
        }
    }
}

/// Instantaneous regret of each action: `util[a] - node_utility`.
///
/// The solver weights these by the opponent's reach probability when it
/// writes them to a table.
pub fn counterfactual_regrets(
    action_utils: &[f64; NUM_ACTIONS],
    node_utility: f64,
) -> [f64; NUM_ACTIONS] {
    action_utils.map(|u| u - node_utility)
}

/// Expected payoff for `player` from `state` when every decision follows `policy`.
///
/// `policy(acting_player, infoset)` returns the strategy to play. Nothing is
/// mutated, so this evaluates any fixed profile: current strategies,
/// average strategies, or a pure best-response candidate.
pub fn expected_utility<F>(
    game: &KuhnPoker,
    state: &GameState,
    terminal: bool,
    player: usize,
    policy: &F,
) -> f64
where
    F: Fn(usize, usize) -> Strategy,
{
    if terminal {
        return f64::from(game.payoffs(state)[player]);
    }

    let acting = state.active_player;
    let strategy = policy(acting, game.info_set(state, acting));

    KuhnAction::ALL
        .iter()
        .map(|&action| {
            let prob = strategy[action.index()];
            if prob == 0.0 {
                return 0.0;
            }
            let (child, child_terminal) = game.step(state, action);
            prob * expected_utility(game, &child, child_terminal, player, policy)
        })
        .sum()
}
