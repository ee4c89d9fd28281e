//! Game state and the interaction resolution machine (§4).

use crate::error::EngineError;
use crate::models::action::{Action, ActionKind};
use crate::models::player::PlayerState;
use crate::models::role::Role;
use crate::models::rules::Rules;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Which half of the two-stage interaction protocol is open (§4.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    /// Stage A: responders may Pass, Challenge, or Block the primary claim.
    Declared,
    /// Stage B: the primary actor may Pass or Challenge the block.
    Blocked,
}

/// The interaction currently awaiting a response, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pending {
    /// The primary action that opened this interaction.
    pub action: Action,
    /// The role the primary action implicitly claims, if any.
    pub claim_role: Option<Role>,
    /// The seat that declared a block, once one has been declared.
    pub blocker: Option<usize>,
    /// The role the block implicitly claims, once one has been declared.
    pub block_role: Option<Role>,
    /// The seat whose response is currently awaited.
    pub awaiting_response_from: usize,
    /// Which stage of the protocol is open.
    pub stage: Stage,
}

/// Complete, deep-cloneable state of a Coup game (§3).
///
/// Cloning a `GameState` clones its embedded RNG stream along with its
/// player/deck/pending data, so a solver can branch a hypothetical future
/// from any node without perturbing the line it branched from (§5).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Shared static configuration.
    pub rules: Rules,
    /// Per-seat mutable state, indexed by seat number.
    pub players: Vec<PlayerState>,
    /// Face-down draw pile; the tail is the "top" of the deck.
    pub deck: Vec<Role>,
    /// Seat whose turn it currently is, when no interaction is pending.
    pub current_player: usize,
    /// The interaction awaiting a response, if one is open.
    pub pending: Option<Pending>,
    rng: Xoshiro256PlusPlus,
}

impl GameState {
    /// Deal a fresh game for `num_players` seats from a shuffled deck, seeded
    /// deterministically. Dealing alternates one card per seat, matching the
    /// original engine's outer-loop-over-rounds order exactly.
    pub fn new(num_players: usize, seed: u64, rules: Rules) -> Result<Self, EngineError> {
        if !(2..=6).contains(&num_players) {
            return Err(EngineError::InvariantViolation(format!(
                "Coup supports 2-6 players, got {num_players}"
            )));
        }

        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let mut deck = rules.full_deck();
        deck.shuffle(&mut rng);

        let mut hands = vec![Vec::with_capacity(rules.cards_per_player); num_players];
        for _round in 0..rules.cards_per_player {
            for hand in hands.iter_mut() {
                let card = deck
                    .pop()
                    .expect("deck must hold enough cards for the configured player count");
                hand.push(card);
            }
        }
        let players = hands
            .into_iter()
            .map(|hand| PlayerState::new(rules.starting_coins, hand))
            .collect();

        Ok(Self {
            rules,
            players,
            deck,
            current_player: 0,
            pending: None,
            rng,
        })
    }

    /// Seats that still hold at least one influence.
    pub fn alive_players(&self) -> Vec<usize> {
        (0..self.players.len())
            .filter(|&i| self.players[i].is_alive())
            .collect()
    }

    /// The sole survivor, once the game has ended.
    pub fn winner(&self) -> Option<usize> {
        let alive = self.alive_players();
        if alive.len() == 1 {
            Some(alive[0])
        } else {
            None
        }
    }

    /// The seat whose legal move is next: the current player absent an
    /// interaction, or the seat whose response is awaited otherwise.
    pub fn decision_maker(&self) -> usize {
        match &self.pending {
            None => self.current_player,
            Some(p) => p.awaiting_response_from,
        }
    }

    /// Nearest alive opponent clockwise from `current_player`, the implicit
    /// target for actions declared without one (§4.1).
    pub fn default_target(&self) -> Option<usize> {
        let n = self.players.len();
        (1..n)
            .map(|offset| (self.current_player + offset) % n)
            .find(|&cand| self.players[cand].is_alive())
    }

    /// Every action legal for the current decision maker.
    pub fn legal_actions(&self) -> Vec<Action> {
        if self.winner().is_some() {
            return Vec::new();
        }
        match &self.pending {
            None => self.legal_primary_actions(),
            Some(pending) => self.legal_response_actions(pending),
        }
    }

    fn legal_primary_actions(&self) -> Vec<Action> {
        let actor = self.current_player;
        let coins = self.players[actor].coins;

        if coins >= self.rules.mandatory_coup_threshold {
            let target = self
                .default_target()
                .expect("an opponent must be alive while the game is non-terminal");
            return vec![Action::new(actor, ActionKind::Coup, Some(target))];
        }

        let mut actions = vec![
            Action::new(actor, ActionKind::Income, None),
            Action::new(actor, ActionKind::ForeignAid, None),
            Action::new(actor, ActionKind::Tax, None),
            Action::new(actor, ActionKind::Exchange, None),
        ];
        if let Some(target) = self.default_target() {
            actions.push(Action::new(actor, ActionKind::Steal, Some(target)));
            if coins >= self.rules.assassinate_cost {
                actions.push(Action::new(actor, ActionKind::Assassinate, Some(target)));
            }
            if coins >= self.rules.coup_cost {
                actions.push(Action::new(actor, ActionKind::Coup, Some(target)));
            }
        }
        actions
    }

    fn legal_response_actions(&self, pending: &Pending) -> Vec<Action> {
        let responder = pending.awaiting_response_from;
        let mut kinds = match pending.stage {
            Stage::Declared => {
                let mut kinds = vec![ActionKind::Pass];
                kinds.extend_from_slice(self.rules.blocks_for(pending.action.kind));
                if !matches!(pending.action.kind, ActionKind::ForeignAid) {
                    kinds.push(ActionKind::Challenge);
                }
                kinds
            }
            Stage::Blocked => vec![ActionKind::Pass, ActionKind::Challenge],
        };
        kinds.dedup();
        kinds
            .into_iter()
            .map(|kind| Action::new(responder, kind, None))
            .collect()
    }

    /// Apply a legal action from the current decision maker, advancing the
    /// turn when the interaction (if any) has fully resolved.
    pub fn apply(&mut self, action: Action) -> Result<(), EngineError> {
        let expected_actor = self.decision_maker();
        if action.actor != expected_actor {
            return Err(EngineError::WrongActor {
                expected: expected_actor,
                actual: action.actor,
            });
        }
        if !self.legal_actions().contains(&action) {
            return Err(EngineError::IllegalAction {
                kind: action.kind,
                actor: action.actor,
            });
        }

        match self.pending.take() {
            None => self.apply_primary(action)?,
            Some(pending) => self.apply_response(pending, action)?,
        }

        if self.winner().is_none() && self.pending.is_none() {
            self.advance_turn();
        }
        Ok(())
    }

    fn apply_primary(&mut self, action: Action) -> Result<(), EngineError> {
        match action.kind {
            ActionKind::Income => {
                self.players[action.actor].coins += 1;
            }
            ActionKind::Coup => {
                let target = action
                    .target
                    .ok_or_else(|| EngineError::InvariantViolation("Coup requires a target".into()))?;
                self.players[action.actor].coins -= self.rules.coup_cost;
                self.lose_influence(target);
            }
            ActionKind::Assassinate => {
                self.players[action.actor].coins -= self.rules.assassinate_cost;
                self.open_interaction(action);
            }
            ActionKind::ForeignAid | ActionKind::Tax | ActionKind::Exchange | ActionKind::Steal => {
                self.open_interaction(action);
            }
            other => {
                return Err(EngineError::InvariantViolation(format!(
                    "{other:?} is not a primary action"
                )))
            }
        }
        Ok(())
    }

    fn open_interaction(&mut self, action: Action) {
        let claim_role = self.rules.claim_for(action.kind);
        let awaiting = match action.target {
            Some(t) => t,
            None => self
                .default_target()
                .expect("at least one opponent must be alive to open an interaction"),
        };
        self.pending = Some(Pending {
            action,
            claim_role,
            blocker: None,
            block_role: None,
            awaiting_response_from: awaiting,
            stage: Stage::Declared,
        });
    }

    fn apply_response(&mut self, pending: Pending, action: Action) -> Result<(), EngineError> {
        match (pending.stage, action.kind) {
            (Stage::Declared, ActionKind::Pass) => self.resolve_primary_success(pending.action)?,
            (Stage::Declared, ActionKind::Challenge) => {
                self.resolve_stage_a_challenge(pending, action.actor)?
            }
            (Stage::Declared, block_kind) => {
                let block_role = self.rules.block_claim_for(block_kind);
                self.pending = Some(Pending {
                    blocker: Some(action.actor),
                    block_role,
                    awaiting_response_from: pending.action.actor,
                    stage: Stage::Blocked,
                    ..pending
                });
            }
            (Stage::Blocked, ActionKind::Pass) => {
                // Block stands; the primary action fails. Any cost already
                // paid at declaration (Assassinate) is not refunded.
            }
            (Stage::Blocked, ActionKind::Challenge) => self.resolve_stage_b_challenge(pending)?,
            (Stage::Blocked, other) => {
                return Err(EngineError::InvariantViolation(format!(
                    "{other:?} is not legal once a block is pending"
                )))
            }
        }
        Ok(())
    }

    fn resolve_stage_a_challenge(
        &mut self,
        pending: Pending,
        challenger: usize,
    ) -> Result<(), EngineError> {
        let claim_role = pending
            .claim_role
            .expect("a stage-A challenge always targets a claimed role");
        let actor = pending.action.actor;
        if self.players[actor].role_count(claim_role) > 0 {
            self.truthful_reveal(actor, claim_role);
            self.lose_influence(challenger);
            self.resolve_primary_success(pending.action)?;
        } else {
            self.lose_influence(actor);
        }
        Ok(())
    }

    fn resolve_stage_b_challenge(&mut self, pending: Pending) -> Result<(), EngineError> {
        let block_role = pending
            .block_role
            .expect("a stage-B challenge always targets a claimed block role");
        let blocker = pending
            .blocker
            .expect("a stage-B challenge always has a blocker");
        let challenger = pending.action.actor;
        if self.players[blocker].role_count(block_role) > 0 {
            self.truthful_reveal(blocker, block_role);
            self.lose_influence(challenger);
        } else {
            self.lose_influence(blocker);
            self.resolve_primary_success(pending.action)?;
        }
        Ok(())
    }

    fn resolve_primary_success(&mut self, action: Action) -> Result<(), EngineError> {
        match action.kind {
            ActionKind::ForeignAid => {
                self.players[action.actor].coins += 2;
            }
            ActionKind::Tax => {
                self.players[action.actor].coins += 3;
            }
            ActionKind::Steal => {
                let target = action.target.ok_or_else(|| {
                    EngineError::InvariantViolation("Steal requires a target".into())
                })?;
                let amount = self.players[target].coins.min(2);
                self.players[target].coins -= amount;
                self.players[action.actor].coins += amount;
            }
            ActionKind::Assassinate => {
                let target = action.target.ok_or_else(|| {
                    EngineError::InvariantViolation("Assassinate requires a target".into())
                })?;
                self.lose_influence(target);
            }
            ActionKind::Exchange => {
                self.perform_exchange(action.actor);
            }
            other => {
                return Err(EngineError::InvariantViolation(format!(
                    "{other:?} cannot resolve through the interaction machine"
                )))
            }
        }
        Ok(())
    }

    /// Remove the player's first concealed card and reveal it. First-card
    /// order is the deterministic tie-break for which influence is lost (§4.1).
    fn lose_influence(&mut self, player: usize) {
        if !self.players[player].hand.is_empty() {
            let lost = self.players[player].hand.remove(0);
            self.players[player].revealed.push(lost);
        }
    }

    /// Return a truthfully-claimed card to the deck, reshuffle, and draw a
    /// replacement, matching the original engine's exact shuffle-and-draw
    /// reveal mechanic.
    fn truthful_reveal(&mut self, player: usize, role: Role) {
        let idx = self.players[player]
            .hand
            .iter()
            .position(|&r| r == role)
            .expect("truthful reveal requires the player to actually hold the claimed role");
        self.players[player].hand.remove(idx);
        self.deck.push(role);
        self.deck.shuffle(&mut self.rng);
        let replacement = self
            .deck
            .pop()
            .expect("deck must be non-empty after returning the revealed card");
        self.players[player].hand.push(replacement);
    }

    /// Draw two cards, keep the lowest-ordinal `cards_per_player` of
    /// hand+draw (stable on ties, so original hand order breaks ties over
    /// newly drawn cards), and return the remainder to the deck (§4.1).
    fn perform_exchange(&mut self, actor: usize) {
        let drawn: Vec<Role> = (0..2)
            .map(|_| {
                self.deck
                    .pop()
                    .expect("deck must hold at least two cards for an exchange")
            })
            .collect();

        let mut combined = self.players[actor].hand.clone();
        combined.extend(drawn);

        let mut order: Vec<usize> = (0..combined.len()).collect();
        order.sort_by_key(|&i| combined[i]);

        let keep = self.rules.cards_per_player.min(combined.len());
        let kept: HashSet<usize> = order[..keep].iter().copied().collect();

        let mut new_hand = Vec::with_capacity(keep);
        let mut remainder = Vec::with_capacity(combined.len() - keep);
        for (i, role) in combined.into_iter().enumerate() {
            if kept.contains(&i) {
                new_hand.push(role);
            } else {
                remainder.push(role);
            }
        }
        self.players[actor].hand = new_hand;
        self.deck.extend(remainder);
    }

    fn advance_turn(&mut self) {
        let n = self.players.len();
        let mut next = (self.current_player + 1) % n;
        while !self.players[next].is_alive() {
            next = (next + 1) % n;
        }
        self.current_player = next;
    }
}
