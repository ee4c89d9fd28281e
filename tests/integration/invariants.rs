//! Universal invariants that must hold across arbitrary reachable states,
//! not just the handful of scripted scenarios in `scenarios.rs`.

use coup_solver::models::{Action, ActionKind, GameState, Role, Rules};
use coup_solver::solver::{Solver, TraversalMode};
use pretty_assertions::assert_eq;
use std::collections::HashMap;

fn deal(seed: u64) -> GameState {
    GameState::new(2, seed, Rules::default()).unwrap()
}

fn role_census(state: &GameState) -> HashMap<Role, usize> {
    let mut counts = HashMap::new();
    for player in &state.players {
        for role in player.hand.iter().chain(player.revealed.iter()) {
            *counts.entry(*role).or_insert(0) += 1;
        }
    }
    for role in &state.deck {
        *counts.entry(*role).or_insert(0) += 1;
    }
    counts
}

#[test]
fn role_census_is_conserved_through_play() {
    let mut state = deal(21);
    let before = role_census(&state);

    state.apply(Action::new(0, ActionKind::Tax, None)).unwrap();
    state.apply(Action::new(1, ActionKind::Pass, None)).unwrap();
    state.apply(Action::new(1, ActionKind::ForeignAid, None)).unwrap();
    state.apply(Action::new(0, ActionKind::Pass, None)).unwrap();

    let after = role_census(&state);
    assert_eq!(before, after);
    for count in after.values() {
        assert_eq!(*count, 3);
    }
}

#[test]
fn coin_totals_never_go_negative() {
    let mut state = deal(22);
    for _ in 0..20 {
        let decision_maker = state.decision_maker();
        let legal = state.legal_actions();
        let choice = legal[0];
        if state.apply(choice).is_err() {
            break;
        }
        for player in &state.players {
            assert!(player.coins >= 0);
        }
        if state.winner().is_some() {
            break;
        }
        let _ = decision_maker;
    }
}

#[test]
fn turn_pointer_always_names_a_living_player() {
    let mut state = deal(23);
    for _ in 0..10 {
        if state.winner().is_some() {
            break;
        }
        assert!(state.players[state.current_player].hand.len() > 0);
        let legal = state.legal_actions();
        if legal.is_empty() {
            break;
        }
        if state.apply(legal[0]).is_err() {
            break;
        }
    }
}

#[test]
fn legal_actions_are_never_empty_before_a_winner_is_decided() {
    let mut state = deal(24);
    for _ in 0..15 {
        if state.winner().is_some() {
            return;
        }
        let legal = state.legal_actions();
        assert!(!legal.is_empty());
        if state.apply(legal[0]).is_err() {
            return;
        }
    }
}

#[test]
fn pending_state_machine_is_internally_consistent() {
    let mut state = deal(25);
    state.apply(Action::new(0, ActionKind::Tax, None)).unwrap();
    let pending = state.pending.expect("tax opens an interaction");
    assert_eq!(pending.claim_role, Some(Role::Duke));
    assert_eq!(pending.awaiting_response_from, 1);

    state.apply(Action::new(1, ActionKind::Pass, None)).unwrap();
    assert!(state.pending.is_none());
}

#[test]
fn action_probabilities_form_a_normalized_distribution() {
    let mut solver = Solver::new(9, 60, TraversalMode::Sampled, false, false);
    solver.iterate(15, None);

    let state = deal(26);
    let dist = solver.action_probabilities(&state);
    let total: f64 = dist.iter().map(|(_, p)| p).sum();
    assert!((total - 1.0).abs() < 1e-6);
    assert!(dist.iter().all(|(_, p)| *p >= 0.0));
}

#[test]
fn checkpoint_round_trips_the_node_table_exactly() {
    let mut solver = Solver::new(5, 60, TraversalMode::Sampled, false, false);
    solver.iterate(25, None);

    let dir = std::env::temp_dir().join(format!("coup-solver-invariant-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("checkpoint.json");

    solver.save_checkpoint(&path).unwrap();
    let before = solver.node_count();

    let mut reloaded = Solver::new(0, 1, TraversalMode::Full, false, false);
    reloaded.load_checkpoint(&path).unwrap();

    assert_eq!(reloaded.node_count(), before);
    assert_eq!(reloaded.max_depth, solver.max_depth);
    assert_eq!(reloaded.traversal_mode, solver.traversal_mode);

    std::fs::remove_dir_all(&dir).ok();
}
