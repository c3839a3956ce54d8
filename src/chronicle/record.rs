// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Fixed-layout little-endian record codecs for the sequence log and
//! per-channel index files. No varints, no framing, no alignment padding.

use std::io::{self, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::chronicle::defines::{ChannelId, RollId};
use crate::core::{ChronicleError, Result};

/// One entry in the global sequence log: the channel a frame belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceEntry {
    /// Channel the corresponding frame was written to.
    pub channel_id: ChannelId,
}

/// Width, in bytes, of an encoded `SequenceEntry`.
pub const SEQUENCE_ENTRY_WIDTH: usize = 8;

impl SequenceEntry {
    /// Encodes this entry as little-endian bytes into `writer`.
    pub fn encode<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_u64::<LittleEndian>(self.channel_id)
    }

    /// Decodes a `SequenceEntry` from a byte slice of at least
    /// [`SEQUENCE_ENTRY_WIDTH`] bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < SEQUENCE_ENTRY_WIDTH {
            return Err(ChronicleError::corrupt(format!(
                "sequence entry needs {SEQUENCE_ENTRY_WIDTH} bytes, found {}",
                bytes.len()
            )));
        }

        let mut cursor = bytes;
        let channel_id = cursor
            .read_u64::<LittleEndian>()
            .map_err(|e| ChronicleError::corrupt(format!("decoding sequence entry: {e}")))?;

        Ok(SequenceEntry { channel_id })
    }
}

/// One entry in a channel's index file: where a frame lives in its roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexEntry {
    /// Roll the frame's payload bytes live in.
    pub roll_id: RollId,
    /// Byte offset within that roll where the payload starts.
    pub roll_position: u64,
    /// Length, in bytes, of the payload (may be 0).
    pub data_size: u64,
}

/// Width, in bytes, of an encoded `IndexEntry`.
pub const INDEX_ENTRY_WIDTH: usize = 24;

impl IndexEntry {
    /// Encodes this entry as little-endian bytes into `writer`.
    pub fn encode<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_u64::<LittleEndian>(self.roll_id)?;
        writer.write_u64::<LittleEndian>(self.roll_position)?;
        writer.write_u64::<LittleEndian>(self.data_size)
    }

    /// Decodes an `IndexEntry` from a byte slice of at least
    /// [`INDEX_ENTRY_WIDTH`] bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < INDEX_ENTRY_WIDTH {
            return Err(ChronicleError::corrupt(format!(
                "index entry needs {INDEX_ENTRY_WIDTH} bytes, found {}",
                bytes.len()
            )));
        }

        let mut cursor = bytes;
        let roll_id = cursor
            .read_u64::<LittleEndian>()
            .map_err(|e| ChronicleError::corrupt(format!("decoding index entry: {e}")))?;
        let roll_position = cursor
            .read_u64::<LittleEndian>()
            .map_err(|e| ChronicleError::corrupt(format!("decoding index entry: {e}")))?;
        let data_size = cursor
            .read_u64::<LittleEndian>()
            .map_err(|e| ChronicleError::corrupt(format!("decoding index entry: {e}")))?;

        Ok(IndexEntry {
            roll_id,
            roll_position,
            data_size,
        })
    }

    /// The half-open byte range `[roll_position, roll_position + data_size)`
    /// this entry refers to within its roll.
    pub fn byte_range(&self) -> std::ops::Range<usize> {
        let start = self.roll_position as usize;
        let end = start + self.data_size as usize;
        start..end
    }
}

/// Sums the lengths of every span in `spans`.
pub fn total_len(spans: &[&[u8]]) -> u64 {
    spans.iter().map(|s| s.len() as u64).sum()
}

/// Appends raw payload bytes (verbatim, no framing) to `writer`.
pub fn append_payload<W: Write>(writer: &mut W, data: &[u8]) -> io::Result<()> {
    writer.write_all(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_entry_round_trips() {
        let entry = SequenceEntry { channel_id: 68964786 };
        let mut buf = Vec::new();
        entry.encode(&mut buf).unwrap();
        assert_eq!(buf.len(), SEQUENCE_ENTRY_WIDTH);
        assert_eq!(SequenceEntry::decode(&buf).unwrap(), entry);
    }

    #[test]
    fn index_entry_round_trips() {
        let entry = IndexEntry {
            roll_id: 7,
            roll_position: 128,
            data_size: 42,
        };
        let mut buf = Vec::new();
        entry.encode(&mut buf).unwrap();
        assert_eq!(buf.len(), INDEX_ENTRY_WIDTH);
        assert_eq!(IndexEntry::decode(&buf).unwrap(), entry);
        assert_eq!(entry.byte_range(), 128..170);
    }

    #[test]
    fn decode_fails_on_truncated_bytes() {
        assert!(SequenceEntry::decode(&[1, 2, 3]).is_err());
        assert!(IndexEntry::decode(&[0u8; 10]).is_err());
    }

    #[test]
    fn total_len_sums_spans() {
        let a = [1u8, 2, 3];
        let b = [4u8, 5];
        let spans: Vec<&[u8]> = vec![&a, &b];
        assert_eq!(total_len(&spans), 5);
    }
}
