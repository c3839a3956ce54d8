// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! `MemoryCrate`: a bounds-checked view into a memory-mapped roll file that
//! keeps the underlying mapping alive for as long as the view is held.

use std::sync::Arc;

use memmap2::Mmap;

use crate::core::{ChronicleError, Result};

/// A zero-copy view into a byte range of a memory-mapped roll file.
///
/// Cloning a `MemoryCrate` is cheap: it bumps the `Arc` refcount on the
/// backing mapping rather than copying bytes. The mapping is only unmapped
/// once every `MemoryCrate` (and the cache entry it came from) has been
/// dropped, so a crate stays valid even after its roll is evicted from the
/// reader's roll cache.
#[derive(Clone)]
pub struct MemoryCrate {
    mapping: Arc<Mmap>,
    offset: usize,
    len: usize,
}

impl MemoryCrate {
    /// Build a view into `[offset, offset + len)` of `mapping`.
    ///
    /// Fails with [`ChronicleError::Corrupt`] if that range falls outside
    /// the mapping.
    pub fn new(mapping: Arc<Mmap>, offset: usize, len: usize) -> Result<Self> {
        let end = offset.checked_add(len).ok_or_else(|| {
            ChronicleError::corrupt(format!(
                "record range overflows: offset={offset}, len={len}"
            ))
        })?;

        if end > mapping.len() {
            return Err(ChronicleError::corrupt(format!(
                "record range [{offset}, {end}) exceeds mapping of {} bytes",
                mapping.len()
            )));
        }

        Ok(MemoryCrate {
            mapping,
            offset,
            len,
        })
    }

    /// The bytes this crate refers to.
    pub fn as_bytes(&self) -> &[u8] {
        &self.mapping[self.offset..self.offset + self.len]
    }

    /// Number of bytes in this crate.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if this crate refers to zero bytes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
