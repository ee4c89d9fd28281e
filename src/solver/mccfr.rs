//! MCCFR driver: iteration, traversal, evaluation (§4.8-4.9).

use crate::error::EngineError;
use crate::models::action::Action;
use crate::models::game_state::GameState;
use crate::models::rules::Rules;
use crate::solver::info_set;
use crate::solver::regret::{Node, NodeTable};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Floor applied to a sampled action's probability before dividing by it, so
/// a near-zero strategy weight can't blow up the importance-sampled regret.
const PROBABILITY_EPSILON: f64 = 1e-9;

/// Full-branch visits every legal action each traversal step; outcome-sampled
/// visits one, drawn from the current strategy, and corrects with importance
/// weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraversalMode {
    /// Draw one action per decision and importance-weight its regret.
    Sampled,
    /// Recurse into every legal action and weight regret by the others' reach.
    Full,
}

impl FromStr for TraversalMode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sampled" => Ok(TraversalMode::Sampled),
            "full" => Ok(TraversalMode::Full),
            other => Err(EngineError::InvariantViolation(format!(
                "unknown traversal mode '{other}', expected 'sampled' or 'full'"
            ))),
        }
    }
}

impl fmt::Display for TraversalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraversalMode::Sampled => write!(f, "sampled"),
            TraversalMode::Full => write!(f, "full"),
        }
    }
}

/// Draw an index from a discrete distribution (§4.9): the first index whose
/// cumulative sum reaches `r`, or the last index on floating-point drift.
pub fn sample_index(probabilities: &[f64], rng: &mut Xoshiro256PlusPlus) -> usize {
    let r: f64 = rng.gen();
    let mut cumulative = 0.0;
    for (i, p) in probabilities.iter().enumerate() {
        cumulative += p;
        if cumulative >= r {
            return i;
        }
    }
    probabilities.len().saturating_sub(1)
}

/// A self-play MCCFR solver over two-player Coup.
///
/// Owns its node table and RNG exclusively; nothing here is global, so
/// multiple solvers can run independently in the same process (§5).
#[derive(Debug, Clone)]
pub struct Solver {
    pub(crate) nodes: NodeTable,
    rng: Xoshiro256PlusPlus,
    pub max_depth: u32,
    pub traversal_mode: TraversalMode,
    debug: bool,
    log_infoset_hash: bool,
    rules: Rules,
}

impl Solver {
    /// Construct a solver with an empty node table.
    pub fn new(
        seed: u64,
        max_depth: u32,
        traversal_mode: TraversalMode,
        debug: bool,
        log_infoset_hash: bool,
    ) -> Self {
        Self {
            nodes: NodeTable::default(),
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
            max_depth,
            traversal_mode,
            debug,
            log_infoset_hash,
            rules: Rules::default(),
        }
    }

    /// Number of distinct information sets visited so far.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Run `iterations` rounds of self-play, updating regrets and average
    /// strategies for both players each round (§4.8).
    pub fn iterate(&mut self, iterations: u32, game_seed: Option<u64>) {
        for _ in 0..iterations {
            for updating_player in 0..2 {
                let seed = game_seed.unwrap_or_else(|| self.rng.gen());
                let state = GameState::new(2, seed, self.rules)
                    .expect("the solver always deals exactly two players");
                self.traverse(&state, updating_player, 1.0, 1.0, 0);
            }
        }
    }

    fn traverse(
        &mut self,
        state: &GameState,
        updating_player: usize,
        reach_updating: f64,
        reach_other: f64,
        depth: u32,
    ) -> f64 {
        if depth >= self.max_depth {
            if self.debug {
                log::debug!("depth cap {} reached, truncating with utility 0", self.max_depth);
            }
            return 0.0;
        }
        if let Some(winner) = state.winner() {
            return if winner == updating_player { 1.0 } else { -1.0 };
        }

        let decision_maker = state.decision_maker();
        let legal = state.legal_actions();
        let action_keys: Vec<String> = legal.iter().map(Action::action_key).collect();
        let key = info_set::encode(state, decision_maker);
        if self.log_infoset_hash {
            log::debug!("infoset key={key}");
        }

        let strategy = {
            let node = self.nodes.entry(key.clone()).or_insert_with(Node::default);
            let strategy = node.current_strategy(&action_keys);
            let weight = if decision_maker == updating_player {
                reach_updating
            } else {
                reach_other
            };
            for (k, p) in action_keys.iter().zip(&strategy) {
                node.accumulate_strategy(k, weight * p);
            }
            strategy
        };

        match self.traversal_mode {
            TraversalMode::Full => {
                let mut action_utils = Vec::with_capacity(legal.len());
                for (i, action) in legal.iter().enumerate() {
                    let mut next = state.clone();
                    next.apply(*action)
                        .expect("legal_actions only returns actions apply() accepts");
                    let (next_reach_updating, next_reach_other) = if decision_maker == updating_player
                    {
                        (reach_updating * strategy[i], reach_other)
                    } else {
                        (reach_updating, reach_other * strategy[i])
                    };
                    action_utils.push(self.traverse(
                        &next,
                        updating_player,
                        next_reach_updating,
                        next_reach_other,
                        depth + 1,
                    ));
                }
                let v: f64 = strategy.iter().zip(&action_utils).map(|(p, u)| p * u).sum();
                if decision_maker == updating_player {
                    let node = self.nodes.get_mut(&key).expect("node was just inserted above");
                    for (k, u) in action_keys.iter().zip(&action_utils) {
                        node.add_regret(k, reach_other * (u - v));
                    }
                }
                v
            }
            TraversalMode::Sampled => {
                let sampled_idx = sample_index(&strategy, &mut self.rng);
                let action = legal[sampled_idx];
                let p_sampled = strategy[sampled_idx].max(PROBABILITY_EPSILON);

                let mut next = state.clone();
                next.apply(action)
                    .expect("legal_actions only returns actions apply() accepts");
                let (next_reach_updating, next_reach_other) = if decision_maker == updating_player {
                    (reach_updating * strategy[sampled_idx], reach_other)
                } else {
                    (reach_updating, reach_other * strategy[sampled_idx])
                };
                let u = self.traverse(
                    &next,
                    updating_player,
                    next_reach_updating,
                    next_reach_other,
                    depth + 1,
                );

                if decision_maker == updating_player {
                    let node = self.nodes.get_mut(&key).expect("node was just inserted above");
                    // Standard outcome-sampling importance-weighted estimator:
                    // u_hat(sampled) = u / p_sampled, u_hat(other) = 0, so
                    // v_hat = u and regret(a) = reach_other * (u_hat(a) - v_hat).
                    for (i, k) in action_keys.iter().enumerate() {
                        let delta = if i == sampled_idx {
                            reach_other * (u / p_sampled - u)
                        } else {
                            -reach_other * u
                        };
                        node.add_regret(k, delta);
                    }
                }
                u
            }
        }
    }

    /// The extracted policy at `state`: average strategy where available,
    /// falling back to the current regret-matching strategy, then uniform.
    pub fn action_probabilities(&self, state: &GameState) -> Vec<(Action, f64)> {
        let legal = state.legal_actions();
        if legal.is_empty() {
            return Vec::new();
        }
        let decision_maker = state.decision_maker();
        let key = info_set::encode(state, decision_maker);
        let action_keys: Vec<String> = legal.iter().map(Action::action_key).collect();

        let probabilities = match self.nodes.get(&key) {
            Some(node) => node
                .average_strategy(&action_keys)
                .unwrap_or_else(|| node.current_strategy(&action_keys)),
            None => vec![1.0 / legal.len() as f64; legal.len()],
        };

        legal.into_iter().zip(probabilities).collect()
    }

    /// Play `episodes` self-play games under the current average policy and
    /// return the mean utility for player 0.
    pub fn evaluate(&mut self, episodes: u32, seed: Option<u64>) -> f64 {
        let mut eval_rng = match seed {
            Some(s) => Xoshiro256PlusPlus::seed_from_u64(s),
            None => Xoshiro256PlusPlus::from_entropy(),
        };

        let mut total = 0.0;
        for _ in 0..episodes {
            let game_seed = eval_rng.gen();
            let mut state = GameState::new(2, game_seed, self.rules)
                .expect("the solver always deals exactly two players");

            let mut depth = 0;
            loop {
                if let Some(winner) = state.winner() {
                    total += if winner == 0 { 1.0 } else { -1.0 };
                    break;
                }
                if depth >= self.max_depth {
                    break;
                }
                let distribution = self.action_probabilities(&state);
                let weights: Vec<f64> = distribution.iter().map(|(_, p)| *p).collect();
                let idx = sample_index(&weights, &mut eval_rng);
                state
                    .apply(distribution[idx].0)
                    .expect("action_probabilities only returns legal actions");
                depth += 1;
            }
        }
        total / episodes as f64
    }
}
