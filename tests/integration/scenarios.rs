//! The concrete scenarios from the engine's testable-properties section,
//! reproduced against fixed deals. Where a scenario depends on a specific
//! role being in a hand, the hand is assigned directly rather than hunting
//! for a seed that happens to deal it — the forced condition is what the
//! scenario actually tests, not the seed's incidental deal.

use coup_solver::error::CoupError;
use coup_solver::models::{Action, ActionKind, GameState, Role, Rules};
use coup_solver::solver::{Solver, TraversalMode};
use pretty_assertions::assert_eq;

fn deal(seed: u64) -> GameState {
    GameState::new(2, seed, Rules::default()).unwrap()
}

#[test]
fn scenario_1_setup_determinism() {
    let state = deal(42);
    for player in &state.players {
        assert_eq!(player.coins, 2);
        assert_eq!(player.hand.len(), 2);
        assert_eq!(player.revealed.len(), 0);
    }
    assert_eq!(state.deck.len(), 11);
    assert_eq!(state.current_player, 0);
}

#[test]
fn scenario_2_coup_at_seven() {
    let mut state = deal(5);
    state.players[0].coins = 7;
    state.apply(Action::new(0, ActionKind::Coup, Some(1))).unwrap();

    assert_eq!(state.players[0].coins, 0);
    assert_eq!(state.players[1].hand.len(), 1);
    assert_eq!(state.players[1].revealed.len(), 1);
    assert_eq!(state.current_player, 1);
}

#[test]
fn scenario_3_mandatory_coup_at_ten() {
    let mut state = deal(3);
    state.players[0].coins = 10;
    let actions = state.legal_actions();
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].kind, ActionKind::Coup);
    assert_eq!(actions[0].target, Some(1));
}

#[test]
fn scenario_4_foreign_aid_opponent_passes() {
    let mut state = deal(7);
    state.apply(Action::new(0, ActionKind::ForeignAid, None)).unwrap();
    state.apply(Action::new(1, ActionKind::Pass, None)).unwrap();

    assert_eq!(state.players[0].coins, 4);
    assert!(state.pending.is_none());
    assert_eq!(state.current_player, 1);
}

#[test]
fn scenario_5_foreign_aid_truthful_duke_block() {
    let mut state = deal(8);
    state.players[1].hand = vec![Role::Duke, Role::Assassin];
    let starting_coins = state.players[0].coins;

    state.apply(Action::new(0, ActionKind::ForeignAid, None)).unwrap();
    state.apply(Action::new(1, ActionKind::BlockForeignAid, None)).unwrap();
    state.apply(Action::new(0, ActionKind::Challenge, None)).unwrap();

    assert_eq!(state.players[0].coins, starting_coins);
    assert_eq!(state.players[0].revealed.len(), 1);
    assert!(state.pending.is_none());
    assert_eq!(state.current_player, 1);
}

#[test]
fn scenario_6_foreign_aid_bluffed_block() {
    let mut state = deal(9);
    state.players[1].hand = vec![Role::Captain, Role::Contessa];

    state.apply(Action::new(0, ActionKind::ForeignAid, None)).unwrap();
    state.apply(Action::new(1, ActionKind::BlockForeignAid, None)).unwrap();
    state.apply(Action::new(0, ActionKind::Challenge, None)).unwrap();

    assert_eq!(state.players[0].coins, 4);
    assert_eq!(state.players[1].revealed.len(), 1);
    assert!(state.pending.is_none());
}

#[test]
fn scenario_7_tax_truthful_vs_bluff() {
    let mut truthful = deal(11);
    truthful.players[0].hand = vec![Role::Duke, Role::Captain];
    truthful.apply(Action::new(0, ActionKind::Tax, None)).unwrap();
    truthful.apply(Action::new(1, ActionKind::Challenge, None)).unwrap();
    assert_eq!(truthful.players[0].coins, 5);
    assert_eq!(truthful.players[1].revealed.len(), 1);

    let mut bluff = deal(12);
    bluff.players[0].hand = vec![Role::Assassin, Role::Contessa];
    bluff.apply(Action::new(0, ActionKind::Tax, None)).unwrap();
    bluff.apply(Action::new(1, ActionKind::Challenge, None)).unwrap();
    assert_eq!(bluff.players[0].coins, 2);
    assert_eq!(bluff.players[0].revealed.len(), 1);
}

#[test]
fn scenario_8_steal_transfer_ceiling() {
    let mut low = deal(13);
    low.players[0].coins = 0;
    low.players[1].coins = 2;
    low.apply(Action::new(0, ActionKind::Steal, Some(1))).unwrap();
    low.apply(Action::new(1, ActionKind::Pass, None)).unwrap();
    assert_eq!((low.players[0].coins, low.players[1].coins), (2, 0));

    let mut tight = deal(14);
    tight.players[0].coins = 1;
    tight.players[1].coins = 1;
    tight.apply(Action::new(0, ActionKind::Steal, Some(1))).unwrap();
    tight.apply(Action::new(1, ActionKind::Pass, None)).unwrap();
    assert_eq!((tight.players[0].coins, tight.players[1].coins), (2, 0));
}

#[test]
fn scenario_9_assassinate_cost_non_refund() {
    let mut passed = deal(15);
    passed.players[0].coins = 3;
    passed.apply(Action::new(0, ActionKind::Assassinate, Some(1))).unwrap();
    assert_eq!(passed.players[0].coins, 0);
    passed.apply(Action::new(1, ActionKind::Pass, None)).unwrap();
    assert_eq!(passed.players[1].revealed.len(), 1);

    let mut bluffed = deal(16);
    bluffed.players[0].coins = 3;
    bluffed.players[0].hand = vec![Role::Duke, Role::Captain];
    bluffed.apply(Action::new(0, ActionKind::Assassinate, Some(1))).unwrap();
    bluffed.apply(Action::new(1, ActionKind::Challenge, None)).unwrap();
    assert_eq!(bluffed.players[0].coins, 0);
    assert_eq!(bluffed.players[0].revealed.len(), 1);
}

#[test]
fn scenario_10_solver_smoke() {
    let mut solver = Solver::new(123, 60, TraversalMode::Sampled, false, false);
    solver.iterate(1, Some(42));

    let value = solver.evaluate(1, Some(7));
    assert!((-1.0..=1.0).contains(&value));

    let root = deal(42);
    let dist = solver.action_probabilities(&root);
    assert!(!dist.is_empty());
    let total: f64 = dist.iter().map(|(_, p)| p).sum();
    assert!((total - 1.0).abs() < 1e-6);
}

#[test]
fn checkpoint_failure_surfaces_as_a_coup_error() {
    let mut solver = Solver::new(0, 60, TraversalMode::Sampled, false, false);
    let result = solver.load_checkpoint("/nonexistent/path/checkpoint.json");
    assert!(result.is_err());
    let _: CoupError = result.unwrap_err().into();
}
