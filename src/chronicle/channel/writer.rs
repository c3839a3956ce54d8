// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! `ChannelWriter`: owns one channel's index file and active roll, handling
//! roll rotation and index bookkeeping.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use crate::chronicle::defines::{RollId, DEFAULT_MAX_ROLL_BYTES, INDEX_FILE_NAME};
use crate::chronicle::paths::roll_name;
use crate::chronicle::record::{append_payload, total_len, IndexEntry};
use crate::core::{ChronicleError, Result};

/// Owns a single channel's append-only index file and currently active roll.
///
/// Once a write fails, the writer latches into a permanent failure state:
/// every subsequent call returns the recorded error without attempting any
/// further I/O, matching the channel's *Open → Failed* state machine.
pub struct ChannelWriter {
    channel_dir: PathBuf,
    max_roll_bytes: u64,
    index_file: File,
    roll_counter: RollId,
    active_roll: File,
    failed: Option<ChronicleError>,
}

fn open_roll(channel_dir: &Path, roll_id: RollId) -> Result<File> {
    let path = channel_dir.join(roll_name(roll_id));
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

impl ChannelWriter {
    /// Creates the channel directory (failing with `AlreadyExists` if it is
    /// already present), opens the index file, and obtains roll 0.
    pub fn new(channel_dir: impl Into<PathBuf>, max_roll_bytes: u64) -> Result<Self> {
        let channel_dir = channel_dir.into();

        if channel_dir.exists() {
            return Err(ChronicleError::already_exists(channel_dir));
        }

        fs::create_dir_all(&channel_dir)?;

        let index_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(channel_dir.join(INDEX_FILE_NAME))?;

        let roll_counter: RollId = 0;
        let active_roll = open_roll(&channel_dir, roll_counter)?;

        Ok(ChannelWriter {
            channel_dir,
            max_roll_bytes,
            index_file,
            roll_counter,
            active_roll,
            failed: None,
        })
    }

    /// Constructs a `ChannelWriter` with the default max roll size.
    pub fn with_default_max_roll_bytes(channel_dir: impl Into<PathBuf>) -> Result<Self> {
        Self::new(channel_dir, DEFAULT_MAX_ROLL_BYTES)
    }

    /// Writes a single contiguous frame.
    pub fn write_frame(&mut self, data: &[u8]) -> Result<()> {
        self.write_frame_spans(&[data])
    }

    /// Writes a frame assembled from multiple spans, scattered in memory but
    /// contiguous on disk, in the order given.
    ///
    /// A zero-size frame skips rotation and the payload append but still
    /// records an `IndexEntry` with `data_size == 0`, so the reader's cursor
    /// stays in lockstep with the writer's sequence log.
    pub fn write_frame_spans(&mut self, spans: &[&[u8]]) -> Result<()> {
        if let Some(err) = &self.failed {
            return Err(err.clone());
        }

        let result = self.write_frame_spans_inner(spans);
        if let Err(err) = &result {
            self.failed = Some(err.clone());
        }
        result
    }

    fn write_frame_spans_inner(&mut self, spans: &[&[u8]]) -> Result<()> {
        let size = total_len(spans);

        if size > self.max_roll_bytes {
            return Err(ChronicleError::invalid_argument(format!(
                "space requested ({size} bytes) is greater than the maximum allowed size of \
                 the file ({} bytes); this is an impossible constraint to satisfy",
                self.max_roll_bytes
            )));
        }

        if size > 0 && !self.roll_has_space(size)? {
            self.rotate()?;
        }

        let position = self.active_roll.metadata()?.len();

        IndexEntry {
            roll_id: self.roll_counter,
            roll_position: position,
            data_size: size,
        }
        .encode(&mut self.index_file)?;

        for span in spans {
            append_payload(&mut self.active_roll, span)?;
        }

        Ok(())
    }

    fn roll_has_space(&self, additional: u64) -> Result<bool> {
        let current_len = self.active_roll.metadata()?.len();
        Ok(current_len + additional <= self.max_roll_bytes)
    }

    fn rotate(&mut self) -> Result<()> {
        self.roll_counter += 1;
        tracing::debug!(
            "Rotating to roll {} in {}",
            self.roll_counter,
            self.channel_dir.display()
        );
        self.active_roll = open_roll(&self.channel_dir, self.roll_counter)?;
        Ok(())
    }

    /// Path of this channel's directory.
    pub fn channel_dir(&self) -> &Path {
        &self.channel_dir
    }
}
