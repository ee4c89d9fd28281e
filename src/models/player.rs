//! Per-seat mutable state: coins, hand, and revealed cards (§3).

use crate::models::role::Role;
use serde::{Deserialize, Serialize};

/// One player's coins, concealed hand, and face-up reveal pile.
///
/// Grounded on `original_source/coup_gto/engine/state.py`'s `PlayerState`
/// dataclass, expressed as a plain struct the way the teacher's `GameState`
/// fields are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Coins held.
    pub coins: u32,
    /// Concealed role cards. Normally `cards_per_player` long, transiently
    /// `cards_per_player + 1` mid-exchange.
    pub hand: Vec<Role>,
    /// Role cards lost to challenges, bluffs, or Coup/Assassinate — append-only.
    pub revealed: Vec<Role>,
}

impl PlayerState {
    /// A freshly dealt player with no revealed cards.
    pub fn new(starting_coins: u32, hand: Vec<Role>) -> Self {
        Self {
            coins: starting_coins,
            hand,
            revealed: Vec::new(),
        }
    }

    /// Alive iff the hand is non-empty.
    pub fn is_alive(&self) -> bool {
        !self.hand.is_empty()
    }

    /// How many copies of `role` this player currently holds face-down.
    pub fn role_count(&self, role: Role) -> usize {
        self.hand.iter().filter(|&&r| r == role).count()
    }
}
