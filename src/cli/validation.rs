//! CLI argument validation and run-directory defaults.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Resolve `--out`, defaulting to a fresh timestamped `runs/<epoch-seconds>`
/// directory when empty, and ensure it exists.
pub fn ensure_out_dir(out: &str) -> std::io::Result<PathBuf> {
    let dir = if out.is_empty() {
        let epoch_seconds = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock is after the Unix epoch")
            .as_secs();
        PathBuf::from("runs").join(epoch_seconds.to_string())
    } else {
        PathBuf::from(out)
    };
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Chunk size for progress logging, or `None` to run `total` iterations in
/// one call. Mirrors the reference CLI's "0 or >= total disables chunking" rule.
pub fn log_chunk_size(total: u32, interval: u32) -> Option<u32> {
    if interval == 0 || interval >= total {
        None
    } else {
        Some(interval)
    }
}
