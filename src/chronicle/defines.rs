// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Identifiers and constants shared across the chronicle storage engine.

/// Unique identifier for a data channel.
pub type ChannelId = u64;

/// Identifier for a roll within a channel, monotonically increasing from 0.
pub type RollId = u64;

/// Name of the sequence log file within a chronicle directory.
pub const SEQUENCE_FILE_NAME: &str = "sequence";

/// Name of the index file within a channel directory.
pub const INDEX_FILE_NAME: &str = "index";

/// Default maximum size, in bytes, of an individual roll file.
pub const DEFAULT_MAX_ROLL_BYTES: u64 = 128 * 1024 * 1024;

/// Number of recently-mapped rolls a `ChannelReader` keeps warm.
///
/// A performance knob, not a correctness contract: raising it only reduces
/// re-map syscalls on channels that are read with a scattered access pattern.
pub const ROLL_CACHE_CAPACITY: usize = 5;

/// Returns the default root directory for chronicles: the OS temp directory
/// joined with `niocLogs`.
pub fn default_log_root() -> std::path::PathBuf {
    std::env::temp_dir().join("niocLogs")
}
