//! Role card representation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the five character roles. Declaration order is the role's ordinal,
/// used by [`crate::models::game_state::GameState`] to break exchange-keep
/// ties deterministically (§4.3's "stable role ordering").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Taxes for 3 coins, blocks Foreign Aid.
    Duke,
    /// Assassinates a target for 3 coins.
    Assassin,
    /// Steals from a target.
    Captain,
    /// Exchanges cards with the deck, blocks Captain steals.
    Ambassador,
    /// Blocks assassination.
    Contessa,
}

impl Role {
    /// All five roles in ordinal order.
    pub const ALL: [Role; 5] = [
        Role::Duke,
        Role::Assassin,
        Role::Captain,
        Role::Ambassador,
        Role::Contessa,
    ];

    /// Stable name used in infoset keys and checkpoint serialization.
    pub fn name(&self) -> &'static str {
        match self {
            Role::Duke => "Duke",
            Role::Assassin => "Assassin",
            Role::Captain => "Captain",
            Role::Ambassador => "Ambassador",
            Role::Contessa => "Contessa",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
