use coup_solver::models::{Action, ActionKind, GameState, Role, Rules};
use coup_solver::solver::info_set::encode;

#[test]
fn key_changes_once_an_interaction_opens() {
    let open = GameState::new(2, 42, Rules::default()).unwrap();
    let mut during = open.clone();
    during.apply(Action::new(0, ActionKind::ForeignAid, None)).unwrap();

    assert_ne!(encode(&open, 0), encode(&during, 0));
}

#[test]
fn key_reflects_coin_and_revealed_changes() {
    let mut a = GameState::new(2, 42, Rules::default()).unwrap();
    let mut b = a.clone();
    b.players[0].coins += 1;
    assert_ne!(encode(&a, 0), encode(&b, 0));

    a.players[1].revealed.push(Role::Duke);
    assert_ne!(encode(&a, 0), encode(&b, 0));
}
