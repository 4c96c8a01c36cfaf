// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Local binlog seam
//!
//! A binlog is a sequence of numbered files. Only the file at
//! `current_index` receives appends; lower indexes are rotated files that
//! may have been purged.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from a binlog append
#[derive(Debug, Error)]
pub enum BinLogError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("event too large: {0} bytes")]
    EventTooLarge(usize),
    #[error("binlog unavailable: {0}")]
    Unavailable(String),
}

/// Prefix shared by every binlog file name
pub const FILE_PREFIX: &str = "binlog";

/// File name for a binlog index: `binlog.0000001`
pub fn file_name(index: i64) -> String {
    format!("{}.{:07}", FILE_PREFIX, index)
}

/// Parse the index back out of a binlog file name
pub fn parse_file_name(name: &str) -> Option<i64> {
    let digits = name.strip_prefix(FILE_PREFIX)?.strip_prefix('.')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Append side of a rotating binlog, plus file resolution for shipping
pub trait BinLog: Send + Sync {
    /// Append every event as one frame, all under one group key
    fn append(&self, events: &[Vec<u8>]) -> Result<(), BinLogError>;

    /// Index of the file currently receiving appends
    fn current_index(&self) -> i64;

    /// Path of the file with the given index (it may not exist)
    fn path_for(&self, index: i64) -> PathBuf;
}

/// Binlog type for a store that keeps no local log
///
/// Uninhabited: a `Replicator<S, NoBinLog>` always has logging disabled.
#[derive(Debug)]
pub enum NoBinLog {}

impl BinLog for NoBinLog {
    fn append(&self, _events: &[Vec<u8>]) -> Result<(), BinLogError> {
        match *self {}
    }

    fn current_index(&self) -> i64 {
        match *self {}
    }

    fn path_for(&self, _index: i64) -> PathBuf {
        match *self {}
    }
}

#[cfg(test)]
#[path = "binlog_tests.rs"]
mod tests;
