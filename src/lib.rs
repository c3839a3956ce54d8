// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Chronicle
//!
//! An append-only, multi-channel binary event log for deterministic offline
//! replay of recorded data streams.
//!
//! A producer writes variable-length frames tagged with a channel id,
//! preserving the exact global order in which they were appended. A
//! consumer later replays every frame in that same order, receiving each
//! frame as a zero-copy byte view over the stored bytes.
//!
//! - **[`ChronicleWriter`]** - appends frames to a session directory, one
//!   global sequence log plus one rolling segmented store per channel
//! - **[`ChronicleReader`]** - replays a session directory in exact write
//!   order, across all channels
//! - **[`MemoryCrate`]** - a shared-ownership, zero-copy view into a
//!   memory-mapped roll file
//!
//! ## Example: Writing and replaying a session
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use chronicle::{default_log_root, ChronicleReader, ChronicleWriter, DEFAULT_MAX_ROLL_BYTES};
//!
//! let writer = ChronicleWriter::new(default_log_root(), DEFAULT_MAX_ROLL_BYTES)?;
//! writer.write(0x4257, b"frame bytes")?;
//! let session = writer.path().to_path_buf();
//! drop(writer);
//!
//! let mut reader = ChronicleReader::new(&session)?;
//! let entry = reader.read()?;
//! assert_eq!(entry.crate_.as_bytes(), b"frame bytes");
//! # Ok(())
//! # }
//! ```

// Error handling and result alias.
pub mod core;

pub use core::{ChronicleError, Result};

// Generic concurrency helpers (reader-writer lock wrapper, lazy cache).
pub mod sync;

pub use sync::{LazyCache, RwGuarded};

// The storage engine: paths, records, per-channel storage, top-level
// writer/reader, and the zero-copy byte view.
pub mod chronicle;

pub use chronicle::{
    default_log_root, ChannelId, ChronicleReader, ChronicleWriter, Entry, MemoryCrate, RollId,
    DEFAULT_MAX_ROLL_BYTES,
};
