//! Regret tracking and matching (§4.7).
//!
//! Unlike a fixed small action set, Coup's legal actions vary in both count
//! and composition across infosets, so regrets and strategy sums are keyed
//! by `action_key` string rather than by position in a `Vec`.

use rustc_hash::FxHashMap;

/// Convert cumulative regrets to a strategy using regret matching.
///
/// Negative regrets are treated as zero and the result is normalized to sum
/// to 1.0. If every regret is non-positive, the legal actions get a uniform
/// strategy instead.
pub fn regret_matching(regret_sum: &FxHashMap<String, f64>, legal_keys: &[String]) -> Vec<f64> {
    let positive: Vec<f64> = legal_keys
        .iter()
        .map(|k| regret_sum.get(k).copied().unwrap_or(0.0).max(0.0))
        .collect();
    let total: f64 = positive.iter().sum();

    if total > 0.0 {
        positive.into_iter().map(|r| r / total).collect()
    } else {
        let n = legal_keys.len();
        if n == 0 {
            Vec::new()
        } else {
            vec![1.0 / n as f64; n]
        }
    }
}

/// One information set's accumulated regrets and strategy mass.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Node {
    /// Cumulative counterfactual regret per action key.
    pub regret_sum: FxHashMap<String, f64>,
    /// Cumulative reach-weighted strategy mass per action key.
    pub strategy_sum: FxHashMap<String, f64>,
}

impl Node {
    /// The current regret-matching policy over `legal_keys`.
    pub fn current_strategy(&self, legal_keys: &[String]) -> Vec<f64> {
        regret_matching(&self.regret_sum, legal_keys)
    }

    /// Add `delta` to the accumulated regret for `action_key`.
    pub fn add_regret(&mut self, action_key: &str, delta: f64) {
        *self.regret_sum.entry(action_key.to_string()).or_insert(0.0) += delta;
    }

    /// Accumulate `weight` of strategy mass for `action_key` (the
    /// reach-weighted current strategy, added once per visit).
    pub fn accumulate_strategy(&mut self, action_key: &str, weight: f64) {
        *self.strategy_sum.entry(action_key.to_string()).or_insert(0.0) += weight;
    }

    /// The time-averaged policy over `legal_keys`, normalized; `None` when
    /// `legal_keys` is empty or accumulated strategy mass is non-positive,
    /// so the caller can fall through to the current regret-matching
    /// strategy before giving up to uniform (§4.7's three-level fallback).
    pub fn average_strategy(&self, legal_keys: &[String]) -> Option<Vec<f64>> {
        if legal_keys.is_empty() {
            return None;
        }
        let raw: Vec<f64> = legal_keys
            .iter()
            .map(|k| self.strategy_sum.get(k).copied().unwrap_or(0.0))
            .collect();
        let total: f64 = raw.iter().sum();
        if total > 0.0 {
            Some(raw.into_iter().map(|s| s / total).collect())
        } else {
            None
        }
    }
}

/// All visited information sets, keyed by infoset string (§4.6).
pub type NodeTable = FxHashMap<String, Node>;
