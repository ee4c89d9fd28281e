//! MCCFR solver for two-player Coup.

pub mod checkpoint;
pub mod info_set;
pub mod mccfr;
pub mod regret;

pub use checkpoint::{Checkpoint, CheckpointConfig};
pub use mccfr::{Solver, TraversalMode};
pub use regret::{Node, NodeTable};
