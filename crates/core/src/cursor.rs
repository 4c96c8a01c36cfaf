// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Replication cursor: how far a replica has consumed the master's binlog

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// File index meaning the replica must fully resynchronize
pub const RESYNC_INDEX: i64 = -1;

#[derive(Debug, Error)]
pub enum CursorError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Position in the rotating binlog up to which whole frames were shipped
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplCursor {
    pub log_file_index: i64,
    pub log_pos: i64,
}

impl ReplCursor {
    pub fn new(log_file_index: i64, log_pos: i64) -> Self {
        Self {
            log_file_index,
            log_pos,
        }
    }

    /// The file this cursor pointed at is gone
    pub fn needs_resync(&self) -> bool {
        self.log_file_index == RESYNC_INDEX
    }

    /// Load a persisted cursor; a missing file is the default cursor
    pub fn load(path: &Path) -> Result<Self, CursorError> {
        match fs::read_to_string(path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Persist via a temporary sibling and rename
    pub fn save(&self, path: &Path) -> Result<(), CursorError> {
        let json = serde_json::to_string_pretty(self)?;
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "cursor_tests.rs"]
mod tests;
