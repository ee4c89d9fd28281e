//! Error types for the Coup MCCFR solver.

use crate::models::action::ActionKind;
use thiserror::Error;

/// Errors raised by the game engine while applying actions to a [`crate::models::GameState`].
///
/// Every variant here indicates a caller or engine bug, not a recoverable
/// player mistake — `GameState::legal_actions` is the only source of truth
/// for what a caller may submit.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The submitted action is not in the current legal-action set.
    #[error("illegal action {kind:?} by player {actor}")]
    IllegalAction {
        /// The offending action's kind.
        kind: ActionKind,
        /// The seat that attempted it.
        actor: usize,
    },

    /// The submitted action's actor is not the current decision maker.
    #[error("action submitted by player {actual}, expected player {expected}")]
    WrongActor {
        /// The seat whose response was actually awaited.
        expected: usize,
        /// The seat that submitted the action.
        actual: usize,
    },

    /// An internal invariant was violated — a bug in the engine, not the caller.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

/// Errors raised by the solver, distinct from engine errors because they're
/// about I/O and data, not game legality.
#[derive(Debug, Error)]
pub enum SolverError {
    /// Failed to read or write a checkpoint file.
    #[error("checkpoint I/O error at '{path}': {source}")]
    CheckpointIo {
        /// Path that was being read or written.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A checkpoint file's contents could not be parsed.
    #[error("checkpoint at '{path}' is not valid: {source}")]
    CheckpointParse {
        /// Path that failed to parse.
        path: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// Top-level error type unifying engine and solver failures.
#[derive(Debug, Error)]
pub enum CoupError {
    /// An engine-level failure applying an action.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// A solver-level failure, typically checkpoint I/O.
    #[error(transparent)]
    Solver(#[from] SolverError),
}

/// Result type for fallible operations across the crate.
pub type Result<T> = std::result::Result<T, CoupError>;
