// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Error types for chronicle storage operations.
//!
//! The taxonomy mirrors the failure modes of the underlying filesystem and
//! on-disk layout: bad arguments, a channel directory that already exists,
//! I/O failures, decoded records that point outside a mapping, and the
//! expected end-of-chronicle signal.

use std::fmt;
use std::path::PathBuf;

/// Errors that can occur while writing to or reading from a chronicle.
#[derive(Debug, Clone)]
pub enum ChronicleError {
    /// A caller-supplied argument was malformed (bad hex string, missing
    /// directory, unknown mechanism).
    InvalidArgument {
        /// Description of what was wrong.
        message: String,
    },

    /// A channel directory (or other path) that must not already exist does.
    AlreadyExists {
        /// Path that already existed.
        path: PathBuf,
    },

    /// A filesystem operation failed (create, open, write, mmap).
    Io {
        /// What was being attempted.
        context: String,
        /// Underlying OS error message.
        source: String,
    },

    /// A decoded record pointed outside its mapped region, or a referenced
    /// roll file was missing, or a record's width didn't match the mapping.
    Corrupt {
        /// Description of the inconsistency.
        context: String,
    },

    /// The sequence log or a channel index has been fully replayed.
    ///
    /// This is the expected, normal way a replay terminates.
    EndOfChronicle,
}

impl ChronicleError {
    /// Create an invalid-argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        ChronicleError::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an already-exists error.
    pub fn already_exists(path: impl Into<PathBuf>) -> Self {
        ChronicleError::AlreadyExists { path: path.into() }
    }

    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: impl fmt::Display) -> Self {
        ChronicleError::Io {
            context: context.into(),
            source: source.to_string(),
        }
    }

    /// Create a corruption error.
    pub fn corrupt(context: impl Into<String>) -> Self {
        ChronicleError::Corrupt {
            context: context.into(),
        }
    }

    /// True if this is the expected end-of-chronicle signal rather than a
    /// genuine failure.
    pub fn is_end_of_chronicle(&self) -> bool {
        matches!(self, ChronicleError::EndOfChronicle)
    }
}

impl fmt::Display for ChronicleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChronicleError::InvalidArgument { message } => {
                write!(f, "invalid argument: {message}")
            }
            ChronicleError::AlreadyExists { path } => {
                write!(f, "already exists: {}", path.display())
            }
            ChronicleError::Io { context, source } => {
                write!(f, "I/O error in {context}: {source}")
            }
            ChronicleError::Corrupt { context } => {
                write!(f, "corrupt chronicle: {context}")
            }
            ChronicleError::EndOfChronicle => write!(f, "end of chronicle"),
        }
    }
}

impl std::error::Error for ChronicleError {}

impl From<std::io::Error> for ChronicleError {
    fn from(err: std::io::Error) -> Self {
        ChronicleError::Io {
            context: "filesystem".to_string(),
            source: err.to_string(),
        }
    }
}

/// Result type for chronicle operations.
pub type Result<T> = std::result::Result<T, ChronicleError>;
