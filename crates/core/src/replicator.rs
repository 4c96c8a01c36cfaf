// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Store-plus-binlog aggregate
//!
//! `Replicator` owns the commit lock. Every batch commit, whether it
//! carries local writes or an applied replication group, commits the
//! store and appends to the binlog inside that lock, so binlog order is
//! always a valid order of store commits.

use crate::batch::ReplBatch;
use crate::binlog::{BinLog, NoBinLog};
use crate::store::Store;
use parking_lot::{Mutex, MutexGuard};

/// Read buffer used when applying from a binlog file
pub const DEFAULT_READ_BUFFER_SIZE: usize = 4096;

pub struct Replicator<S, L = NoBinLog> {
    store: S,
    binlog: Option<L>,
    commit_lock: Mutex<()>,
    read_buffer_size: usize,
}

impl<S: Store> Replicator<S, NoBinLog> {
    /// Replicator with local logging disabled
    pub fn without_binlog(store: S) -> Self {
        Self::new(store, None)
    }
}

impl<S: Store, L: BinLog> Replicator<S, L> {
    pub fn new(store: S, binlog: Option<L>) -> Self {
        Self {
            store,
            binlog,
            commit_lock: Mutex::new(()),
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
        }
    }

    pub fn with_binlog(store: S, binlog: L) -> Self {
        Self::new(store, Some(binlog))
    }

    pub fn with_read_buffer_size(mut self, size: usize) -> Self {
        self.read_buffer_size = size.max(1);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The local binlog, or `None` when logging is disabled
    pub fn binlog(&self) -> Option<&L> {
        self.binlog.as_ref()
    }

    pub fn read_buffer_size(&self) -> usize {
        self.read_buffer_size
    }

    /// Start an empty batch for local writes or an apply session
    pub fn begin(&self) -> ReplBatch<'_, S, L> {
        ReplBatch::new(self)
    }

    pub(crate) fn lock_commits(&self) -> MutexGuard<'_, ()> {
        self.commit_lock.lock()
    }
}
