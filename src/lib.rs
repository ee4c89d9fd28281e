//! Coup MCCFR solver
//!
//! A library implementing a Coup game engine and a Monte Carlo Counterfactual
//! Regret Minimization (MCCFR) self-play solver that converges towards an
//! approximate Nash equilibrium for two-player Coup.

#![warn(missing_docs)]

/// Data models: roles, actions, rules, players, game state.
pub mod models;

/// MCCFR solver implementation.
pub mod solver;

/// CLI interface components.
pub mod cli;

/// Error types.
pub mod error;

// Re-export commonly used types
pub use error::{CoupError, Result};
