// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! `ChronicleWriter`: the top-level entry point for writing a chronicle,
//! owning the session directory, the global sequence log, and the
//! per-channel writers it hands frames off to.

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use uuid::Uuid;

use crate::chronicle::channel::ChannelWriter;
use crate::chronicle::defines::{ChannelId, SEQUENCE_FILE_NAME};
use crate::chronicle::paths::{hex_channel_dir, iso8601_utc};
use crate::chronicle::record::SequenceEntry;
use crate::core::Result;
use crate::sync::RwGuarded;

fn session_directory(log_root: &Path) -> PathBuf {
    log_root.join(format!(
        "{}_{}",
        iso8601_utc(SystemTime::now()),
        Uuid::new_v4()
    ))
}

fn setup_session_directory(log_root: &Path) -> Result<PathBuf> {
    let session_dir = session_directory(log_root);

    if session_dir.exists() {
        tracing::warn!(
            "Directory or file {} exists already. Contents will be cleared.",
            session_dir.display()
        );
        fs::remove_dir_all(&session_dir)?;
    }

    fs::create_dir_all(&session_dir)?;
    Ok(session_dir)
}

/// Writes frames across any number of channels into a single chronicle
/// session directory, maintaining a totally-ordered global sequence log
/// alongside each channel's own append-only storage.
pub struct ChronicleWriter {
    log_directory: PathBuf,
    max_roll_bytes: u64,
    sequence_file: RwGuarded<std::fs::File>,
    channel_map: RwGuarded<HashMap<ChannelId, RwGuarded<ChannelWriter>>>,
}

impl ChronicleWriter {
    /// Creates a fresh session directory under `log_root` (clearing any
    /// pre-existing contents at the generated path, with a warning) and
    /// opens its sequence log.
    pub fn new(log_root: impl AsRef<Path>, max_roll_bytes: u64) -> Result<Self> {
        let log_directory = setup_session_directory(log_root.as_ref())?;

        let sequence_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_directory.join(SEQUENCE_FILE_NAME))?;

        tracing::info!(
            "Logging to {} with unit file size {}.",
            log_directory.display(),
            max_roll_bytes
        );

        Ok(ChronicleWriter {
            log_directory,
            max_roll_bytes,
            sequence_file: RwGuarded::new(sequence_file),
            channel_map: RwGuarded::new(HashMap::new()),
        })
    }

    /// Writes a single contiguous frame to `channel_id`.
    pub fn write(&self, channel_id: ChannelId, data: &[u8]) -> Result<()> {
        self.write_spans(channel_id, &[data])
    }

    /// Writes a frame assembled from multiple spans to `channel_id`.
    ///
    /// The sequence-log append (step 1) and the per-channel write (step 3)
    /// are not atomic: a crash between them leaves the sequence log ahead of
    /// the channel's index, which a reader surfaces as `Corrupt` when it
    /// reaches the orphaned entry. This is a known, accepted weakness, not a
    /// bug to be fixed here.
    pub fn write_spans(&self, channel_id: ChannelId, spans: &[&[u8]]) -> Result<()> {
        self.sequence_file.write(|file| {
            SequenceEntry { channel_id }.encode(file)
        })??;

        let channel_dir = self.log_directory.join(hex_channel_dir(channel_id));
        let max_roll_bytes = self.max_roll_bytes;

        self.channel_map.write(|channels| -> Result<()> {
            if !channels.contains_key(&channel_id) {
                let writer = ChannelWriter::new(channel_dir, max_roll_bytes)?;
                channels.insert(channel_id, RwGuarded::new(writer));
            }
            Ok(())
        })??;

        self.channel_map.read(|channels| -> Result<()> {
            let guarded = channels.get(&channel_id).expect("just inserted above");
            guarded.write(|writer| writer.write_frame_spans(spans))?
        })?
    }

    /// The session directory this writer is writing into.
    pub fn path(&self) -> &Path {
        &self.log_directory
    }
}
