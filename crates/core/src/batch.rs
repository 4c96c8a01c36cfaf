// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Transaction batch: one group's mutations, committed all at once
//!
//! A batch stages mutations on a store write batch and, when the
//! replicator keeps a binlog, keeps the raw event payloads so the same
//! bytes can be appended once the store commit succeeds.

use crate::binlog::BinLog;
use crate::error::{EventError, ReplError};
use crate::event::{self, TAG_DELETE, TAG_PUT};
use crate::replicator::Replicator;
use crate::store::{Store, WriteBatch};

pub struct ReplBatch<'a, S: Store, L: BinLog> {
    repl: &'a Replicator<S, L>,
    wb: S::Batch,
    events: Vec<Vec<u8>>,
    staged: usize,
    group_key: Option<u32>,
}

impl<'a, S: Store, L: BinLog> ReplBatch<'a, S, L> {
    pub(crate) fn new(repl: &'a Replicator<S, L>) -> Self {
        Self {
            repl,
            wb: repl.store().write_batch(),
            events: Vec::new(),
            staged: 0,
            group_key: None,
        }
    }

    /// Group key of the frames staged so far
    pub fn group_key(&self) -> Option<u32> {
        self.group_key
    }

    pub fn set_group_key(&mut self, key: u32) {
        self.group_key = Some(key);
    }

    /// True when no mutation has been staged since the last commit or rollback
    pub fn is_empty(&self) -> bool {
        self.staged == 0
    }

    /// Raw events waiting for the binlog
    pub fn pending_events(&self) -> &[Vec<u8>] {
        &self.events
    }

    /// Stage a local put
    pub fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), EventError> {
        let raw = event::encode_put(key, value)?;
        self.wb.put(key, value);
        self.record(raw);
        Ok(())
    }

    /// Stage a local delete
    pub fn delete(&mut self, key: &[u8]) {
        self.wb.delete(key);
        self.record(event::encode_delete(key));
    }

    /// Decode one replicated event and stage it
    ///
    /// Never commits or rolls back; on error nothing was staged.
    pub fn apply_event(&mut self, raw: &[u8]) -> Result<(), EventError> {
        match raw.first() {
            None => Err(EventError::Empty),
            Some(&TAG_PUT) => {
                let (key, value) = event::decode_put(raw)?;
                self.wb.put(key, value);
                self.record(raw.to_vec());
                Ok(())
            }
            Some(&TAG_DELETE) => {
                let key = event::decode_delete(raw)?;
                self.wb.delete(key);
                self.record(raw.to_vec());
                Ok(())
            }
            Some(&tag) => Err(EventError::UnknownTag(tag)),
        }
    }

    fn record(&mut self, raw: Vec<u8>) {
        self.staged += 1;
        if self.repl.binlog().is_some() {
            self.events.push(raw);
        }
    }

    /// Commit the store batch, then append the staged events to the binlog
    ///
    /// A store failure rolls back and nothing is visible. A binlog failure
    /// also rolls back the batch state, but the store commit has already
    /// taken effect: the caller must log it and move on, not re-apply.
    pub fn commit(&mut self) -> Result<(), ReplError> {
        let repl = self.repl;
        let _guard = repl.lock_commits();

        if let Err(e) = self.wb.commit() {
            self.rollback();
            return Err(ReplError::StoreCommit(e));
        }

        if let Some(binlog) = repl.binlog() {
            if !self.events.is_empty() {
                if let Err(e) = binlog.append(&self.events) {
                    tracing::error!(
                        group_key = ?self.group_key,
                        events = self.events.len(),
                        error = %e,
                        "store committed but binlog append failed"
                    );
                    self.rollback();
                    return Err(ReplError::LogAppend(e));
                }
            }
        }

        tracing::debug!(group_key = ?self.group_key, events = self.events.len(), "batch committed");
        self.events.clear();
        self.staged = 0;
        self.group_key = None;
        Ok(())
    }

    /// Discard staged mutations and events; safe to call at any time
    pub fn rollback(&mut self) {
        self.wb.rollback();
        self.events.clear();
        self.staged = 0;
        self.group_key = None;
    }
}

#[cfg(test)]
#[path = "batch_tests.rs"]
mod tests;
