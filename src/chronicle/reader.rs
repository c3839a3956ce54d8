// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! `ChronicleReader`: the top-level entry point for replaying a chronicle in
//! the exact global order it was written, fanning each entry out to the
//! owning channel's reader.

use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use memmap2::Mmap;

use crate::chronicle::channel::ChannelReader;
use crate::chronicle::defines::{ChannelId, SEQUENCE_FILE_NAME};
use crate::chronicle::paths::{hex_channel_dir, validate_path};
use crate::chronicle::record::{SequenceEntry, SEQUENCE_ENTRY_WIDTH};
use crate::core::{ChronicleError, Result};
use crate::sync::RwGuarded;

/// One replayed frame: the channel it was written to, and a zero-copy view
/// of its payload bytes.
pub struct Entry {
    /// Channel the frame was written to.
    pub channel_id: ChannelId,
    /// The frame's payload bytes.
    pub crate_: crate::chronicle::memory_crate::MemoryCrate,
}

/// Replays every frame of a chronicle session in the exact order it was
/// written, across all channels.
///
/// Not intended for concurrent use by multiple threads — a single
/// `ChronicleReader` holds one cursor into the global sequence log.
pub struct ChronicleReader {
    log_root: PathBuf,
    sequence_mapping: Mmap,
    next_read_index: u64,
    channel_readers: RwGuarded<HashMap<ChannelId, ChannelReader>>,
}

impl ChronicleReader {
    /// Opens the chronicle session directory at `log_root` for replay.
    pub fn new(log_root: impl Into<PathBuf>) -> Result<Self> {
        let log_root = validate_path(log_root.into())?;

        let sequence_file = File::open(log_root.join(SEQUENCE_FILE_NAME))?;
        let sequence_mapping = unsafe { Mmap::map(&sequence_file) }
            .map_err(|e| ChronicleError::io("mapping sequence file", e))?;

        Ok(ChronicleReader {
            log_root,
            sequence_mapping,
            next_read_index: 0,
            channel_readers: RwGuarded::new(HashMap::new()),
        })
    }

    /// Returns the next entry in global write order, or `EndOfChronicle`
    /// once the sequence log is exhausted.
    pub fn read(&mut self) -> Result<Entry> {
        let offset = (self.next_read_index as usize) * SEQUENCE_ENTRY_WIDTH;

        if offset >= self.sequence_mapping.len() {
            return Err(ChronicleError::EndOfChronicle);
        }

        let sequence_entry = SequenceEntry::decode(&self.sequence_mapping[offset..])?;
        self.next_read_index += 1;

        let channel_id = sequence_entry.channel_id;
        let log_root = &self.log_root;

        self.channel_readers.write(|readers| -> Result<Entry> {
            if !readers.contains_key(&channel_id) {
                let channel_dir = log_root.join(hex_channel_dir(channel_id));
                readers.insert(channel_id, ChannelReader::new(channel_dir)?);
            }

            let reader = readers.get_mut(&channel_id).expect("just inserted above");
            let crate_ = reader.read()?;
            Ok(Entry { channel_id, crate_ })
        })?
    }

    /// The session directory this reader is replaying.
    pub fn path(&self) -> &Path {
        &self.log_root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chronicle::defines::DEFAULT_MAX_ROLL_BYTES;
    use crate::chronicle::writer::ChronicleWriter;

    fn scratch_root(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "chronicle_reader_test_{label}_{}_{:?}",
            std::process::id(),
            std::thread::current().id()
        ))
    }

    #[test]
    fn replays_interleaved_channels_in_write_order() {
        let root = scratch_root("interleaved");
        std::fs::create_dir_all(&root).unwrap();

        let writer = ChronicleWriter::new(&root, DEFAULT_MAX_ROLL_BYTES).unwrap();
        writer.write(16983, &vec![1u8; 20]).unwrap();
        writer.write(68964786, &vec![2u8; 34]).unwrap();
        writer.write(16983, &vec![1u8; 20]).unwrap();
        writer.write(68964786, &vec![2u8; 34]).unwrap();
        let session_dir = writer.path().to_path_buf();
        drop(writer);

        let mut reader = ChronicleReader::new(&session_dir).unwrap();

        let e1 = reader.read().unwrap();
        assert_eq!(e1.channel_id, 16983);
        assert_eq!(e1.crate_.len(), 20);

        let e2 = reader.read().unwrap();
        assert_eq!(e2.channel_id, 68964786);
        assert_eq!(e2.crate_.len(), 34);

        let e3 = reader.read().unwrap();
        assert_eq!(e3.channel_id, 16983);

        let e4 = reader.read().unwrap();
        assert_eq!(e4.channel_id, 68964786);

        assert!(matches!(reader.read(), Err(ChronicleError::EndOfChronicle)));

        let sequence_bytes = std::fs::read(session_dir.join(SEQUENCE_FILE_NAME)).unwrap();
        assert_eq!(sequence_bytes.len(), 32);

        std::fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn missing_log_root_is_rejected_before_opening_sequence_file() {
        let root = scratch_root("missing");

        let result = ChronicleReader::new(&root);
        assert!(matches!(result, Err(ChronicleError::InvalidArgument { .. })));
    }

    #[test]
    fn end_of_chronicle_is_idempotent() {
        let root = scratch_root("idempotent");
        std::fs::create_dir_all(&root).unwrap();

        let writer = ChronicleWriter::new(&root, DEFAULT_MAX_ROLL_BYTES).unwrap();
        writer.write(1, b"x").unwrap();
        let session_dir = writer.path().to_path_buf();
        drop(writer);

        let mut reader = ChronicleReader::new(&session_dir).unwrap();
        reader.read().unwrap();
        assert!(matches!(reader.read(), Err(ChronicleError::EndOfChronicle)));
        assert!(matches!(reader.read(), Err(ChronicleError::EndOfChronicle)));

        std::fs::remove_dir_all(&root).ok();
    }
}
