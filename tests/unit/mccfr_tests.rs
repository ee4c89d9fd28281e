use coup_solver::models::{GameState, Rules};
use coup_solver::solver::{Solver, TraversalMode};

#[test]
fn untouched_solver_falls_back_to_uniform_strategy() {
    let solver = Solver::new(0, 60, TraversalMode::Sampled, false, false);
    let state = GameState::new(2, 42, Rules::default()).unwrap();
    let dist = solver.action_probabilities(&state);

    assert!(!dist.is_empty());
    let expected = 1.0 / dist.len() as f64;
    for (_, p) in &dist {
        assert!((p - expected).abs() < 1e-9);
    }
}

#[test]
fn iterate_visits_at_least_one_infoset_per_rollout() {
    let mut solver = Solver::new(0, 60, TraversalMode::Sampled, false, false);
    assert_eq!(solver.node_count(), 0);
    solver.iterate(1, Some(42));
    assert!(solver.node_count() >= 1);
}

#[test]
fn strategy_distribution_always_sums_to_one() {
    let mut solver = Solver::new(7, 60, TraversalMode::Sampled, false, false);
    solver.iterate(20, None);

    let state = GameState::new(2, 42, Rules::default()).unwrap();
    let dist = solver.action_probabilities(&state);
    let total: f64 = dist.iter().map(|(_, p)| p).sum();
    assert!((total - 1.0).abs() < 1e-6);
    assert!(dist.iter().all(|(_, p)| *p >= 0.0));
}
