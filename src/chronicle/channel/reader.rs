// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! `ChannelReader`: memory-maps a channel's index file and serves frames as
//! zero-copy views into a small, fixed-capacity ring of recently-mapped
//! rolls.

use std::collections::VecDeque;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use memmap2::Mmap;

use crate::chronicle::defines::{RollId, INDEX_FILE_NAME, ROLL_CACHE_CAPACITY};
use crate::chronicle::memory_crate::MemoryCrate;
use crate::chronicle::paths::{roll_name, validate_path};
use crate::chronicle::record::{IndexEntry, INDEX_ENTRY_WIDTH};
use crate::core::{ChronicleError, Result};

struct MappedRoll {
    roll_id: RollId,
    mapping: Arc<Mmap>,
}

/// Reads frames back out of a channel directory in append order.
///
/// Recently-touched rolls are kept warm in a fixed-capacity ring. Lookup is
/// a linear scan and eviction is FIFO (the oldest insertion, not the least
/// recently *read*) — this mirrors a small fixed-size ring buffer rather
/// than a true LRU, and is a performance knob, not a correctness contract:
/// a `MemoryCrate` already handed out keeps its mapping alive independently
/// of whether the ring has since evicted it.
pub struct ChannelReader {
    channel_dir: PathBuf,
    index_mapping: Option<Mmap>,
    next_read_index: u64,
    roll_ring: VecDeque<MappedRoll>,
}

impl ChannelReader {
    /// Opens the channel directory at `channel_dir` for reading.
    pub fn new(channel_dir: impl Into<PathBuf>) -> Result<Self> {
        let channel_dir = validate_path(channel_dir.into())?;

        Ok(ChannelReader {
            channel_dir,
            index_mapping: None,
            next_read_index: 0,
            roll_ring: VecDeque::with_capacity(ROLL_CACHE_CAPACITY),
        })
    }

    fn index_mapping(&mut self) -> Result<&Mmap> {
        if self.index_mapping.is_none() {
            let file = File::open(self.channel_dir.join(INDEX_FILE_NAME))?;
            let mapping = unsafe { Mmap::map(&file) }
                .map_err(|e| ChronicleError::io("mapping channel index", e))?;
            self.index_mapping = Some(mapping);
        }
        Ok(self.index_mapping.as_ref().unwrap())
    }

    /// Returns the next frame's bytes as a zero-copy view, or
    /// `EndOfChronicle` once every index entry has been consumed.
    pub fn read(&mut self) -> Result<MemoryCrate> {
        let offset = (self.next_read_index as usize) * INDEX_ENTRY_WIDTH;
        let index = self.index_mapping()?;

        if offset >= index.len() {
            return Err(ChronicleError::EndOfChronicle);
        }

        let entry = IndexEntry::decode(&index[offset..])?;
        self.next_read_index += 1;

        let mapping = self.acquire_roll(entry.roll_id)?;
        MemoryCrate::new(mapping, entry.roll_position as usize, entry.data_size as usize)
    }

    fn acquire_roll(&mut self, roll_id: RollId) -> Result<Arc<Mmap>> {
        if let Some(existing) = self.roll_ring.iter().find(|r| r.roll_id == roll_id) {
            return Ok(Arc::clone(&existing.mapping));
        }

        let path = self.channel_dir.join(roll_name(roll_id));
        let file = File::open(&path)?;
        let mapping = Arc::new(
            unsafe { Mmap::map(&file) }
                .map_err(|e| ChronicleError::io(format!("mapping roll {roll_id}"), e))?,
        );

        if self.roll_ring.len() == ROLL_CACHE_CAPACITY {
            self.roll_ring.pop_front();
        }
        self.roll_ring.push_back(MappedRoll {
            roll_id,
            mapping: Arc::clone(&mapping),
        });

        Ok(mapping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chronicle::channel::writer::ChannelWriter;
    use crate::chronicle::defines::DEFAULT_MAX_ROLL_BYTES;

    fn scratch_dir(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "chronicle_channel_reader_test_{label}_{}_{:?}",
            std::process::id(),
            std::thread::current().id()
        ))
    }

    #[test]
    fn reads_back_frames_in_order_then_end_of_chronicle() {
        let dir = scratch_dir("order");
        {
            let mut writer = ChannelWriter::new(&dir, DEFAULT_MAX_ROLL_BYTES).unwrap();
            writer.write_frame(b"first").unwrap();
            writer.write_frame(b"second").unwrap();
        }

        let mut reader = ChannelReader::new(&dir).unwrap();
        assert_eq!(reader.read().unwrap().as_bytes(), b"first");
        assert_eq!(reader.read().unwrap().as_bytes(), b"second");
        assert!(matches!(
            reader.read(),
            Err(ChronicleError::EndOfChronicle)
        ));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn crate_survives_ring_eviction() {
        let dir = scratch_dir("eviction");
        {
            // 12 frames of 6 bytes each, 2 per roll of max 12 bytes: 6 distinct
            // rolls, one more than the ring's capacity of 5.
            let mut writer = ChannelWriter::new(&dir, 12).unwrap();
            for _ in 0..12 {
                writer.write_frame(&[7u8; 6]).unwrap();
            }
        }

        let mut reader = ChannelReader::new(&dir).unwrap();
        let held = reader.read().unwrap();

        for _ in 0..11 {
            reader.read().unwrap();
        }

        assert_eq!(held.as_bytes(), [7u8; 6]);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn zero_length_frame_yields_empty_view() {
        let dir = scratch_dir("zerolen");
        {
            let mut writer = ChannelWriter::new(&dir, DEFAULT_MAX_ROLL_BYTES).unwrap();
            writer.write_frame(&[]).unwrap();
        }

        let mut reader = ChannelReader::new(&dir).unwrap();
        let view = reader.read().unwrap();
        assert!(view.is_empty());

        std::fs::remove_dir_all(&dir).ok();
    }
}
