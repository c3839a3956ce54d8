// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Small, generic concurrency helpers used internally by the chronicle
//! storage engine.

pub mod cache;
pub mod locked;

pub use cache::LazyCache;
pub use locked::RwGuarded;
