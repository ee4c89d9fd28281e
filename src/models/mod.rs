//! Data models for the Coup MCCFR solver.

pub mod action;
pub mod game_state;
pub mod player;
pub mod role;
pub mod rules;

pub use action::{Action, ActionKind};
pub use game_state::{GameState, Pending, Stage};
pub use player::PlayerState;
pub use role::Role;
pub use rules::Rules;
