// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Apply driver: replay a frame stream into the local store
//!
//! Consecutive frames with the same group key are one transaction. The
//! driver keeps going past a bad event (that frame is dropped) and past a
//! group whose commit fails (that group is dropped, along with the frame
//! that closed it); only a broken stream aborts the call. Groups whose
//! frames were all dropped are not counted as committed. This is lossy on purpose: a replica stays as caught up
//! as it can, and an `Ok` result does not mean every event was applied.

use crate::binlog::BinLog;
use crate::error::ReplError;
use crate::frame::{for_each_frame, FrameAction};
use crate::replicator::Replicator;
use crate::store::Store;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Outcome of one apply call
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ApplyReport {
    pub frames: u64,
    pub skipped_frames: u64,
    pub groups_committed: u64,
    pub groups_failed: u64,
}

impl<S: Store, L: BinLog> Replicator<S, L> {
    /// Apply frames held in memory
    pub fn apply_from_bytes(&self, data: &[u8]) -> Result<ApplyReport, ReplError> {
        self.apply_from_reader(data)
    }

    /// Apply frames from a binlog-format file
    pub fn apply_from_file(&self, path: &Path) -> Result<ApplyReport, ReplError> {
        let file = File::open(path).map_err(ReplError::StreamRead)?;
        let reader = BufReader::with_capacity(self.read_buffer_size(), file);
        self.apply_from_reader(reader)
    }

    /// Apply frames from an open stream until clean end of stream
    pub fn apply_from_reader<R: Read>(&self, mut reader: R) -> Result<ApplyReport, ReplError> {
        let mut batch = self.begin();
        let mut report = ApplyReport::default();

        let scan = for_each_frame(&mut reader, |group_key, raw| {
            match batch.group_key() {
                None => batch.set_group_key(group_key),
                Some(current) if current != group_key => {
                    let staged = !batch.is_empty();
                    if let Err(err) = batch.commit() {
                        // Rollback cleared the group; the next frame opens a fresh one
                        report.groups_failed += 1;
                        tracing::error!(
                            group_key = current,
                            error = %err,
                            "replication group failed, skipping to next group"
                        );
                        return Ok(FrameAction::Skip);
                    }
                    if staged {
                        report.groups_committed += 1;
                    }
                    batch.set_group_key(group_key);
                }
                Some(_) => {}
            }

            if let Err(err) = batch.apply_event(raw) {
                tracing::error!(
                    group_key,
                    error = %err,
                    "invalid replication event, skipping"
                );
                return Ok(FrameAction::Skip);
            }
            Ok(FrameAction::Continue)
        });

        let summary = match scan {
            Ok(summary) => summary,
            Err(err) => {
                batch.rollback();
                return Err(err);
            }
        };
        report.frames = summary.frames;
        report.skipped_frames = summary.skipped;

        let pending = batch.group_key();
        let staged = !batch.is_empty();
        match batch.commit() {
            Ok(()) => {
                if staged {
                    report.groups_committed += 1;
                }
                tracing::debug!(?report, "apply finished");
                Ok(report)
            }
            Err(err) => {
                tracing::error!(group_key = ?pending, error = %err, "final replication group failed");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
#[path = "apply_tests.rs"]
mod tests;
