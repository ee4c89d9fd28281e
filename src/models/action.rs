//! Action catalog: primary actions and interaction responses.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A primary action or an interaction response. Tagged variants rather than
/// a class hierarchy, dispatched by pattern matching (§9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// +1 coin, unchallengeable.
    Income,
    /// +2 coins, blockable by a Duke claim.
    ForeignAid,
    /// Pay 7, target loses one influence, unchallengeable.
    Coup,
    /// Claims Duke: +3 coins.
    Tax,
    /// Claims Captain: transfer min(2, target.coins) from target.
    Steal,
    /// Claims Assassin: pay 3 at declaration, target loses one influence.
    Assassinate,
    /// Claims Ambassador: draw 2, keep a legal-size hand, return the rest.
    Exchange,
    /// Decline to challenge or block.
    Pass,
    /// Demand proof of the pending claim or block.
    Challenge,
    /// Claim Duke to block Foreign Aid.
    BlockForeignAid,
    /// Claim Contessa to block an assassination.
    BlockAssassinate,
    /// Claim Captain to block a steal.
    BlockStealCaptain,
    /// Claim Ambassador to block a steal.
    BlockStealAmbassador,
}

impl ActionKind {
    /// Stable upper-snake name used in infoset and node-table action keys.
    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::Income => "INCOME",
            ActionKind::ForeignAid => "FOREIGN_AID",
            ActionKind::Coup => "COUP",
            ActionKind::Tax => "TAX",
            ActionKind::Steal => "STEAL",
            ActionKind::Assassinate => "ASSASSINATE",
            ActionKind::Exchange => "EXCHANGE",
            ActionKind::Pass => "PASS",
            ActionKind::Challenge => "CHALLENGE",
            ActionKind::BlockForeignAid => "BLOCK_FOREIGN_AID",
            ActionKind::BlockAssassinate => "BLOCK_ASSASSINATE",
            ActionKind::BlockStealCaptain => "BLOCK_STEAL_CAPTAIN",
            ActionKind::BlockStealAmbassador => "BLOCK_STEAL_AMBASSADOR",
        }
    }

    /// True for the seven actions that can open a turn; false for responses.
    pub fn is_primary(&self) -> bool {
        matches!(
            self,
            ActionKind::Income
                | ActionKind::ForeignAid
                | ActionKind::Coup
                | ActionKind::Tax
                | ActionKind::Steal
                | ActionKind::Assassinate
                | ActionKind::Exchange
        )
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A concrete action: who takes it, what kind, and an optional target seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    /// Seat taking the action.
    pub actor: usize,
    /// What kind of action.
    pub kind: ActionKind,
    /// Target seat, for actions that require one.
    pub target: Option<usize>,
}

impl Action {
    /// Construct an action.
    pub fn new(actor: usize, kind: ActionKind, target: Option<usize>) -> Self {
        Self { actor, kind, target }
    }

    /// The `"TYPE:target_or_-"` key used to index regret and strategy sums (§4.7).
    pub fn action_key(&self) -> String {
        match self.target {
            Some(t) => format!("{}:{}", self.kind.name(), t),
            None => format!("{}:-", self.kind.name()),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.target {
            Some(t) => write!(f, "P{}:{}->P{}", self.actor, self.kind, t),
            None => write!(f, "P{}:{}", self.actor, self.kind),
        }
    }
}
