// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Single-slot lazy cache keyed by equality.
//!
//! Holds at most one `(K, V)` pair. Accessing with a key equal to the one
//! already cached reuses the existing value; accessing with a different key
//! drops it and rebuilds via the supplied constructor.

/// A lazily-built, single-entry memo.
pub struct LazyCache<K, V> {
    slot: Option<(K, V)>,
}

impl<K, V> LazyCache<K, V>
where
    K: PartialEq,
{
    /// Construct an empty cache.
    pub fn new() -> Self {
        Self { slot: None }
    }

    /// Get the cached value for `key`, rebuilding with `build` if the key
    /// has changed (or nothing is cached yet).
    pub fn get_or_build<F>(&mut self, key: K, build: F) -> &V
    where
        F: FnOnce(&K) -> V,
    {
        let stale = match &self.slot {
            Some((cached_key, _)) => *cached_key != key,
            None => true,
        };

        if stale {
            let value = build(&key);
            self.slot = Some((key, value));
        }

        &self.slot.as_ref().unwrap().1
    }
}

impl<K, V> Default for LazyCache<K, V>
where
    K: PartialEq,
{
    fn default() -> Self {
        Self::new()
    }
}
