// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Reader-writer-locked wrapper for a value.
//!
//! `RwGuarded<T>` generalizes the locking pattern `TypeRegistry` uses
//! internally (a `std::sync::RwLock` guarding a map, with closures doing the
//! read/write) into a reusable container. Multiple readers may hold the lock
//! concurrently; a writer gets exclusive access.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::core::{ChronicleError, Result};

/// Thread-safe wrapper guarding a value of type `T`.
///
/// Readers pass a closure that receives `&T`; writers pass a closure that
/// receives `&mut T`. Both return whatever the closure returns. A poisoned
/// lock (a prior writer panicked while holding it) surfaces as an `Io` error
/// rather than panicking the current thread.
pub struct RwGuarded<T> {
    inner: RwLock<T>,
}

impl<T> RwGuarded<T> {
    /// Construct a new guarded value.
    pub fn new(value: T) -> Self {
        Self {
            inner: RwLock::new(value),
        }
    }

    /// Run `op` with shared (read) access to the value.
    pub fn read<F, R>(&self, op: F) -> Result<R>
    where
        F: FnOnce(&T) -> R,
    {
        let guard: RwLockReadGuard<'_, T> = self
            .inner
            .read()
            .map_err(|e| ChronicleError::io("RwGuarded::read", e))?;
        Ok(op(&guard))
    }

    /// Run `op` with exclusive (write) access to the value.
    pub fn write<F, R>(&self, op: F) -> Result<R>
    where
        F: FnOnce(&mut T) -> R,
    {
        let mut guard: RwLockWriteGuard<'_, T> = self
            .inner
            .write()
            .map_err(|e| ChronicleError::io("RwGuarded::write", e))?;
        Ok(op(&mut guard))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_write_roundtrip() {
        let guarded = RwGuarded::new(vec![1, 2, 3]);

        let len = guarded.read(|v| v.len()).unwrap();
        assert_eq!(len, 3);

        guarded.write(|v| v.push(4)).unwrap();
        assert_eq!(guarded.read(|v| v.clone()).unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn concurrent_readers_and_exclusive_writer() {
        use std::sync::Arc;
        use std::thread;

        let guarded = Arc::new(RwGuarded::new(0u64));
        let mut handles = Vec::new();

        for _ in 0..8 {
            let guarded = Arc::clone(&guarded);
            handles.push(thread::spawn(move || {
                guarded.write(|v| *v += 1).unwrap();
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(guarded.read(|v| *v).unwrap(), 8);
    }
}
