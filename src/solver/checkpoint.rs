//! Checkpoint persistence: round-trippable node table + config (§6).

use crate::error::SolverError;
use crate::solver::mccfr::{Solver, TraversalMode};
use crate::solver::regret::NodeTable;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// The config half of a checkpoint: just enough to resume training the way
/// it was started.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckpointConfig {
    /// Recursion depth cap in force when the checkpoint was written.
    pub max_depth: u32,
    /// Traversal mode in force when the checkpoint was written.
    pub traversal_mode: TraversalMode,
}

/// On-disk checkpoint shape: the node table plus its config block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Per-infoset regret and strategy sums.
    pub nodes: NodeTable,
    /// Minimal solver config needed to resume.
    pub config: CheckpointConfig,
}

impl Solver {
    /// Serialize the node table and config to `path` as JSON.
    pub fn save_checkpoint(&self, path: impl AsRef<Path>) -> Result<(), SolverError> {
        let path = path.as_ref();
        let checkpoint = Checkpoint {
            nodes: self.nodes.clone(),
            config: CheckpointConfig {
                max_depth: self.max_depth,
                traversal_mode: self.traversal_mode,
            },
        };
        let json = serde_json::to_string_pretty(&checkpoint).map_err(|source| {
            SolverError::CheckpointParse {
                path: path.display().to_string(),
                source,
            }
        })?;
        fs::write(path, json).map_err(|source| SolverError::CheckpointIo {
            path: path.display().to_string(),
            source,
        })
    }

    /// Load a node table and config from `path`, replacing this solver's own.
    pub fn load_checkpoint(&mut self, path: impl AsRef<Path>) -> Result<(), SolverError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| SolverError::CheckpointIo {
            path: path.display().to_string(),
            source,
        })?;
        let checkpoint: Checkpoint =
            serde_json::from_str(&json).map_err(|source| SolverError::CheckpointParse {
                path: path.display().to_string(),
                source,
            })?;
        self.nodes = checkpoint.nodes;
        self.max_depth = checkpoint.config.max_depth;
        self.traversal_mode = checkpoint.config.traversal_mode;
        Ok(())
    }
}
