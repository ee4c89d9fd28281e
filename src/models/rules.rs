//! Static game parameters: costs, deck composition, block/claim graphs (§4.1).

use crate::models::action::ActionKind;
use crate::models::role::Role;

/// Immutable configuration shared read-only across a game state and its
/// clones. Grounded on `original_source/coup_gto/rules/base.py`'s
/// `BaseRules`, expressed as a plain struct the way the teacher's
/// `MccfrConfig` is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rules {
    /// Coins each player starts with.
    pub starting_coins: u32,
    /// Cards dealt to each player at setup, and kept after an exchange.
    pub cards_per_player: usize,
    /// Coin cost of a Coup.
    pub coup_cost: u32,
    /// Coin cost paid at Assassinate declaration, non-refundable.
    pub assassinate_cost: u32,
    /// Coin count at or above which only Coup is legal.
    pub mandatory_coup_threshold: u32,
    /// Copies of each role in the deck.
    pub deck_copies_per_role: usize,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            starting_coins: 2,
            cards_per_player: 2,
            coup_cost: 7,
            assassinate_cost: 3,
            mandatory_coup_threshold: 10,
            deck_copies_per_role: 3,
        }
    }
}

impl Rules {
    /// The full, unshuffled deck: `deck_copies_per_role` copies of each role.
    pub fn full_deck(&self) -> Vec<Role> {
        let mut deck = Vec::with_capacity(Role::ALL.len() * self.deck_copies_per_role);
        for role in Role::ALL {
            for _ in 0..self.deck_copies_per_role {
                deck.push(role);
            }
        }
        deck
    }

    /// The role a primary action implicitly claims, if any (the claim map).
    pub fn claim_for(&self, kind: ActionKind) -> Option<Role> {
        match kind {
            ActionKind::Tax => Some(Role::Duke),
            ActionKind::Steal => Some(Role::Captain),
            ActionKind::Assassinate => Some(Role::Assassin),
            ActionKind::Exchange => Some(Role::Ambassador),
            _ => None,
        }
    }

    /// The response kinds that can block a given primary action (the block graph).
    pub fn blocks_for(&self, kind: ActionKind) -> &'static [ActionKind] {
        match kind {
            ActionKind::ForeignAid => &[ActionKind::BlockForeignAid],
            ActionKind::Assassinate => &[ActionKind::BlockAssassinate],
            ActionKind::Steal => &[ActionKind::BlockStealCaptain, ActionKind::BlockStealAmbassador],
            _ => &[],
        }
    }

    /// The role a block response implicitly claims.
    pub fn block_claim_for(&self, kind: ActionKind) -> Option<Role> {
        match kind {
            ActionKind::BlockForeignAid => Some(Role::Duke),
            ActionKind::BlockAssassinate => Some(Role::Contessa),
            ActionKind::BlockStealCaptain => Some(Role::Captain),
            ActionKind::BlockStealAmbassador => Some(Role::Ambassador),
            _ => None,
        }
    }
}
