//! Kuhn Poker rule engine.
//!
//! Kuhn Poker is a simplified poker game with a known, mathematically proven
//! Nash equilibrium, which makes it the standard sanity check for CFR.
//!
//! ## Game Rules
//!
//! - 3 cards ranked 1 (Jack), 2 (Queen), 3 (King)
//! - 2 players, each antes 1 chip
//! - Each player receives 1 card, the third stays unseen
//! - Player 0 acts first: Pass or Bet (1 chip)
//! - Facing a bet, Pass folds and Bet calls
//! - Higher card wins at showdown
//!
//! ## Game Tree
//!
//! ```text
//! P0
//! ├── Pass
//! │   └── P1
//! │       ├── Pass → Showdown (pot = 2)
//! │       └── Bet
//! │           └── P0
//! │               ├── Pass → P1 wins (pot = 3)
//! │               └── Bet → Showdown (pot = 4)
//! └── Bet
//!     └── P1
//!         ├── Pass → P0 wins (pot = 3)
//!         └── Bet → Showdown (pot = 4)
//! ```
//!
//! ## Information Sets
//!
//! A player observes only their own card and the opponent's current bet, so
//! every decision collapses to `(card - 1) * 2 + (opponent_bet - 1)`:
//!
//! | key | card | opponent bet | P0 meaning        | P1 meaning      |
//! |-----|------|--------------|-------------------|-----------------|
//! | 0   | J    | 1            | opening           | after a check   |
//! | 1   | J    | 2            | facing check-bet  | facing a bet    |
//! | 2   | Q    | 1            | opening           | after a check   |
//! | 3   | Q    | 2            | facing check-bet  | facing a bet    |
//! | 4   | K    | 1            | opening           | after a check   |
//! | 5   | K    | 2            | facing check-bet  | facing a bet    |
//!
//! **Expected Value** at equilibrium: Player 0 EV = -1/18 ≈ -0.0556

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{KuhnError, Result};

/// Number of players at the table.
pub const NUM_PLAYERS: usize = 2;

/// Number of actions available at every decision point.
pub const NUM_ACTIONS: usize = 2;

/// Number of distinct information-set keys per player.
pub const NUM_INFOSETS: usize = 6;

/// The deck, by rank.
pub const CARDS: [u8; 3] = [1, 2, 3];

/// Actions in Kuhn Poker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KuhnAction {
    /// Pass (check if bets are equal, fold if facing a bet)
    Pass = 0,
    /// Bet (or call if facing a bet)
    Bet = 1,
}

impl KuhnAction {
    /// Both actions, in index order.
    pub const ALL: [KuhnAction; NUM_ACTIONS] = [KuhnAction::Pass, KuhnAction::Bet];

    /// Index of this action in strategy vectors.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Short label used in strategy printouts.
    pub fn name(self) -> &'static str {
        match self {
            KuhnAction::Pass => "p/c",
            KuhnAction::Bet => "bet",
        }
    }
}

impl TryFrom<usize> for KuhnAction {
    type Error = KuhnError;

    fn try_from(value: usize) -> Result<Self> {
        match value {
            0 => Ok(KuhnAction::Pass),
            1 => Ok(KuhnAction::Bet),
            other => Err(KuhnError::InvalidAction(other)),
        }
    }
}

impl fmt::Display for KuhnAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KuhnAction::Pass => write!(f, "Pass"),
            KuhnAction::Bet => write!(f, "Bet"),
        }
    }
}

/// Complete game state in Kuhn Poker.
///
/// States are plain values: every transition returns a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameState {
    /// Card rank held by each player, 0 until dealt.
    pub player_hands: [u8; NUM_PLAYERS],
    /// Chips each player has committed this hand.
    pub bets: [u32; NUM_PLAYERS],
    /// Player to act, or the last actor once the hand is over.
    pub active_player: usize,
    /// Total chips committed.
    pub pot: u32,
}

impl GameState {
    /// Whether both players hold a card.
    pub fn is_dealt(&self) -> bool {
        self.player_hands.iter().all(|&card| card != 0)
    }

    /// Whether both players have committed the same amount.
    pub fn bets_equal(&self) -> bool {
        self.bets[0] == self.bets[1]
    }

    /// Whether the pot equals the sum of both bets.
    pub fn pot_is_consistent(&self) -> bool {
        self.pot == self.bets[0] + self.bets[1]
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "P0:{} P1:{} Bets:{:?} Pot:{} ToAct:P{}",
            KuhnPoker::card_name(self.player_hands[0]),
            KuhnPoker::card_name(self.player_hands[1]),
            self.bets,
            self.pot,
            self.active_player
        )
    }
}

/// Kuhn Poker rules.
///
/// Stateless: every method maps input states to output values.
#[derive(Debug, Clone, Copy, Default)]
pub struct KuhnPoker;

impl KuhnPoker {
    /// Create a new Kuhn Poker game.
    pub fn new() -> Self {
        Self
    }

    /// Get card name for display.
    pub fn card_name(card: u8) -> &'static str {
        match card {
            1 => "J",
            2 => "Q",
            3 => "K",
            _ => "?",
        }
    }

    /// Human-readable description of an information-set key.
    pub fn info_set_label(infoset: usize) -> String {
        let card = (infoset / 2) as u8 + 1;
        let opponent_bet = infoset % 2 + 1;
        format!("{} vs bet {}", Self::card_name(card), opponent_bet)
    }

    /// All six ordered deals, each occurring with probability 1/6.
    pub fn deals() -> [[u8; NUM_PLAYERS]; 6] {
        [[1, 2], [1, 3], [2, 1], [2, 3], [3, 1], [3, 2]]
    }

    /// The pre-deal state with both antes posted.
    pub fn reset(&self) -> GameState {
        GameState {
            player_hands: [0, 0],
            bets: [1, 1],
            active_player: 0,
            pot: 2,
        }
    }

    /// Deal two distinct ranks drawn without replacement.
    ///
    /// The third card is left unseen. Only `player_hands` changes.
    pub fn deal_cards<R: Rng>(&self, state: &GameState, rng: &mut R) -> GameState {
        let mut deck = CARDS;
        deck.shuffle(rng);
        self.with_hands(state, [deck[0], deck[1]])
    }

    /// Deal a chosen pair of ranks.
    ///
    /// # Errors
    /// `InvalidRank` for ranks outside 1..=3, `DuplicateRank` when both
    /// players would hold the same card.
    pub fn deal_fixed(&self, state: &GameState, hands: [u8; NUM_PLAYERS]) -> Result<GameState> {
        if let Some(&bad) = hands.iter().find(|&&card| !CARDS.contains(&card)) {
            return Err(KuhnError::InvalidRank(bad));
        }
        if hands[0] == hands[1] {
            return Err(KuhnError::DuplicateRank(hands[0]));
        }
        Ok(self.with_hands(state, hands))
    }

    /// Assign hands without validation; callers guarantee a legal deal.
    pub(crate) fn with_hands(&self, state: &GameState, hands: [u8; NUM_PLAYERS]) -> GameState {
        debug_assert!(hands[0] != hands[1], "duplicate rank dealt: {:?}", hands);
        GameState {
            player_hands: hands,
            ..*state
        }
    }

    /// Apply an action and report whether the hand is over.
    ///
    /// Terminal checks, in order: a pass facing a bet folds, a bet that
    /// evens the bets calls, and player 1 passing on equal bets ends a
    /// check-check. On a terminal outcome the active player is left on the
    /// player who just acted.
    ///
    /// # Panics
    /// If the resulting pot does not equal the sum of the bets.
    pub fn step(&self, state: &GameState, action: KuhnAction) -> (GameState, bool) {
        debug_assert!(state.is_dealt(), "step called before dealing: {}", state);

        let player = state.active_player;
        let mut bets = state.bets;
        let mut pot = state.pot;

        if action == KuhnAction::Bet {
            bets[player] += 1;
            pot += 1;
        }

        let terminal = match action {
            KuhnAction::Pass => bets[0] != bets[1] || player == 1,
            KuhnAction::Bet => bets[0] == bets[1],
        };

        let next = GameState {
            player_hands: state.player_hands,
            bets,
            active_player: if terminal { player } else { 1 - player },
            pot,
        };
        assert!(next.pot_is_consistent(), "pot invariant broken: {}", next);

        (next, terminal)
    }

    /// Net chip result for each player at a terminal state.
    ///
    /// With unequal bets the higher bettor wins (the other folded); otherwise
    /// the higher card wins. The winner collects the pot minus their own bet,
    /// the loser forfeits their bet.
    ///
    /// # Panics
    /// If the pot does not equal the sum of the bets.
    pub fn payoffs(&self, state: &GameState) -> [i32; NUM_PLAYERS] {
        assert!(state.pot_is_consistent(), "pot invariant broken: {}", state);

        let winner = if !state.bets_equal() {
            if state.bets[0] > state.bets[1] { 0 } else { 1 }
        } else if state.player_hands[0] > state.player_hands[1] {
            0
        } else {
            1
        };
        let loser = 1 - winner;

        let mut payoffs = [0; NUM_PLAYERS];
        payoffs[winner] = (state.pot - state.bets[winner]) as i32;
        payoffs[loser] = -(state.bets[loser] as i32);
        payoffs
    }

    /// Information-set key for `player`: own card and the opponent's bet.
    pub fn info_set(&self, state: &GameState, player: usize) -> usize {
        let hand = state.player_hands[player];
        let opponent_bet = state.bets[1 - player];
        debug_assert!(CARDS.contains(&hand), "info_set called before dealing: {}", state);
        debug_assert!(
            (1..=2).contains(&opponent_bet),
            "opponent bet out of range: {}",
            state
        );

        (hand as usize - 1) * 2 + (opponent_bet as usize - 1)
    }
}
