//! Information set key encoding (§4.6).
//!
//! A pure function from `(state, perspective)` to a string capturing the
//! public history plus `perspective`'s private hand. The deck and the
//! opponent's hand are excluded on purpose — that is what makes this an
//! information set rather than a full game state.

use crate::models::game_state::GameState;

fn joined_or_dash<T: ToString>(values: &[T]) -> String {
    if values.is_empty() {
        "-".to_string()
    } else {
        values.iter().map(ToString::to_string).collect::<Vec<_>>().join(",")
    }
}

/// Encode the information set visible to `perspective` in `state`.
///
/// Strategically indistinguishable states (to `perspective`) always produce
/// the same key; states differing only in the deck order or the opponent's
/// concealed hand always produce the same key too.
pub fn encode(state: &GameState, perspective: usize) -> String {
    let coins = state
        .players
        .iter()
        .map(|p| p.coins.to_string())
        .collect::<Vec<_>>()
        .join(",");

    let revealed = state
        .players
        .iter()
        .map(|p| {
            let mut roles = p.revealed.clone();
            roles.sort();
            joined_or_dash(&roles)
        })
        .collect::<Vec<_>>()
        .join("|");

    let (pending_tuple, block_role, blocker, awaiting, claim_role) = match &state.pending {
        None => (
            "-".to_string(),
            "-".to_string(),
            "-".to_string(),
            "-".to_string(),
            "-".to_string(),
        ),
        Some(p) => (
            format!(
                "{}:{}:{}",
                p.action.kind.name(),
                p.action.actor,
                p.action
                    .target
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "-".to_string())
            ),
            p.block_role.map(|r| r.name().to_string()).unwrap_or_else(|| "-".to_string()),
            p.blocker.map(|b| b.to_string()).unwrap_or_else(|| "-".to_string()),
            p.awaiting_response_from.to_string(),
            p.claim_role.map(|r| r.name().to_string()).unwrap_or_else(|| "-".to_string()),
        ),
    };

    let mut hand = state.players[perspective].hand.clone();
    hand.sort();
    let hand = joined_or_dash(&hand);

    format!(
        "cp={}|coins={}|rev={}|pending={}|block={}|blocker={}|await={}|claim={}||hand={}",
        state.current_player, coins, revealed, pending_tuple, block_role, blocker, awaiting, claim_role, hand
    )
}
