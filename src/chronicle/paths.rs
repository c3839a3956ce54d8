// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Path and format helpers: roll-file naming, hex channel-directory naming,
//! and ISO 8601 timestamp formatting for session directories.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Utc};

use crate::core::{ChronicleError, Result};

const ROLL_FILE_PREFIX: &str = "roll";
const ROLL_FILE_EXTENSION: &str = ".nioc";
const ROLL_NUMBER_WIDTH: usize = 20;
const HEX_PREFIX: &str = "0x";

/// Builds the roll file name for `roll_id`: `"roll" + zero-padded-20-digit
/// decimal + ".nioc"`.
pub fn roll_name(roll_id: u64) -> String {
    let digits = roll_id.to_string();
    let padded = pad_left(&digits, ROLL_NUMBER_WIDTH, '0');
    format!("{ROLL_FILE_PREFIX}{padded}{ROLL_FILE_EXTENSION}")
}

/// Pads `input` on the left with `pad_char` until it is `width` characters
/// long. If `input` is already at least `width` characters, it is returned
/// unchanged (never truncated).
fn pad_left(input: &str, width: usize, pad_char: char) -> String {
    if input.len() >= width {
        return input.to_string();
    }

    let mut padded = String::with_capacity(width);
    for _ in 0..(width - input.len()) {
        padded.push(pad_char);
    }
    padded.push_str(input);
    padded
}

/// Builds the channel directory name for `channel_id`: `"0x"` followed by
/// lowercase hex with no minimum width (`0` maps to `"0x0"`).
pub fn hex_channel_dir(channel_id: u64) -> String {
    format!("{HEX_PREFIX}{channel_id:x}")
}

/// Parses a hex channel-directory name back into a `ChannelId`.
///
/// Strict: the string must start with `0x`; only the suffix is parsed as
/// base-16. (The C++ original parsed the whole string including the prefix
/// through `std::stoull`'s leading-`0x` auto-detection, which is lenient by
/// accident — this is the corrected, strict behavior per the open question.)
pub fn parse_hex(s: &str) -> Result<u64> {
    let suffix = s.strip_prefix(HEX_PREFIX).ok_or_else(|| {
        ChronicleError::invalid_argument(format!("hex string '{s}' does not start with '0x'"))
    })?;

    u64::from_str_radix(suffix, 16)
        .map_err(|e| ChronicleError::invalid_argument(format!("invalid hex string '{s}': {e}")))
}

/// Ensures `path` exists and is a directory, returning it unchanged.
pub fn validate_path(path: impl Into<PathBuf>) -> Result<PathBuf> {
    let path = path.into();

    if !path.is_dir() {
        return Err(ChronicleError::invalid_argument(format!(
            "'{}' does not exist or is not a directory",
            path.display()
        )));
    }

    Ok(path)
}

/// Checks `path` exists and is a directory without taking ownership.
pub fn is_valid_dir(path: &Path) -> bool {
    path.is_dir()
}

/// Formats `time` as `YYYY-MM-DDTHH:MM:SS.fffffffffZ` (nanosecond precision,
/// UTC).
pub fn iso8601_utc(time: SystemTime) -> String {
    let duration = time
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();

    let datetime: DateTime<Utc> = DateTime::from_timestamp(
        duration.as_secs() as i64,
        duration.subsec_nanos(),
    )
    .unwrap_or_else(|| DateTime::from_timestamp(0, 0).expect("epoch is representable"));

    format!(
        "{}.{:09}Z",
        datetime.format("%Y-%m-%dT%H:%M:%S"),
        datetime.timestamp_subsec_nanos()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roll_name_formatting() {
        assert_eq!(roll_name(0), "roll00000000000000000000.nioc");
        assert_eq!(roll_name(3519894239162), "roll00000003519894239162.nioc");
    }

    #[test]
    fn hex_channel_dir_formatting() {
        assert_eq!(hex_channel_dir(0), "0x0");
        assert_eq!(hex_channel_dir(255), "0xff");
        assert_eq!(hex_channel_dir(16983), "0x4257");
    }

    #[test]
    fn parse_hex_round_trips() {
        assert_eq!(parse_hex("0xff").unwrap(), 255);
        assert_eq!(parse_hex("0x0").unwrap(), 0);
        assert_eq!(parse_hex(&hex_channel_dir(68964786)).unwrap(), 68964786);
    }

    #[test]
    fn parse_hex_requires_prefix() {
        assert!(parse_hex("ff").is_err());
        assert!(parse_hex("0xzz").is_err());
    }

    #[test]
    fn iso8601_formatting_matches_reference_instant() {
        let time = std::time::UNIX_EPOCH + std::time::Duration::from_nanos(1756736313992295120);
        assert_eq!(iso8601_utc(time), "2025-09-01T14:18:33.992295120Z");
    }

    #[test]
    fn validate_path_rejects_missing_or_file() {
        assert!(validate_path(PathBuf::from("/nonexistent/definitely/not/here")).is_err());

        let file = std::env::temp_dir().join(format!(
            "chronicle_paths_test_{}_{:?}",
            std::process::id(),
            std::thread::current().id()
        ));
        std::fs::write(&file, b"x").unwrap();
        assert!(validate_path(&file).is_err());
        let _ = std::fs::remove_file(&file);
    }
}
