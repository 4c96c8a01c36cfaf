// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory collaborators with failure injection, for tests

use crate::binlog::{BinLog, BinLogError};
use crate::store::{Store, StoreError, WriteBatch};
use parking_lot::Mutex;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Op {
    Put(Vec<u8>, Vec<u8>),
    Delete(Vec<u8>),
}

impl Op {
    fn key(&self) -> &[u8] {
        match self {
            Op::Put(key, _) | Op::Delete(key) => key,
        }
    }
}

#[derive(Default)]
struct FakeStoreState {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
    poisoned_keys: BTreeSet<Vec<u8>>,
    fail_next: usize,
    commits: usize,
    committed: Vec<Vec<Vec<u8>>>,
}

/// Store whose commits can be made to fail
#[derive(Clone, Default)]
pub struct FakeStore {
    state: Arc<Mutex<FakeStoreState>>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject any commit that stages a mutation of `key`
    pub fn fail_commits_touching(&self, key: &[u8]) {
        self.state.lock().poisoned_keys.insert(key.to_vec());
    }

    /// Reject the next `n` commits regardless of content
    pub fn fail_next_commits(&self, n: usize) {
        self.state.lock().fail_next = n;
    }

    /// Number of successful commits
    pub fn commits(&self) -> usize {
        self.state.lock().commits
    }

    /// Keys of each successful commit, in the order the store applied them
    pub fn committed_keys(&self) -> Vec<Vec<Vec<u8>>> {
        self.state.lock().committed.clone()
    }

    pub fn len(&self) -> usize {
        self.state.lock().data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Store for FakeStore {
    type Batch = FakeWriteBatch;

    fn write_batch(&self) -> FakeWriteBatch {
        FakeWriteBatch {
            store: self.clone(),
            ops: Vec::new(),
        }
    }

    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.state.lock().data.get(key).cloned()
    }
}

pub struct FakeWriteBatch {
    store: FakeStore,
    ops: Vec<Op>,
}

impl WriteBatch for FakeWriteBatch {
    fn put(&mut self, key: &[u8], value: &[u8]) {
        self.ops.push(Op::Put(key.to_vec(), value.to_vec()));
    }

    fn delete(&mut self, key: &[u8]) {
        self.ops.push(Op::Delete(key.to_vec()));
    }

    fn commit(&mut self) -> Result<(), StoreError> {
        let mut state = self.store.state.lock();
        if state.fail_next > 0 {
            state.fail_next -= 1;
            return Err(StoreError::Rejected("injected failure".to_string()));
        }
        if let Some(op) = self
            .ops
            .iter()
            .find(|op| state.poisoned_keys.contains(op.key()))
        {
            return Err(StoreError::Rejected(format!(
                "poisoned key {}",
                String::from_utf8_lossy(op.key())
            )));
        }
        let keys = self.ops.iter().map(|op| op.key().to_vec()).collect();
        state.committed.push(keys);
        for op in self.ops.drain(..) {
            match op {
                Op::Put(key, value) => {
                    state.data.insert(key, value);
                }
                Op::Delete(key) => {
                    state.data.remove(&key);
                }
            }
        }
        state.commits += 1;
        Ok(())
    }

    fn rollback(&mut self) {
        self.ops.clear();
    }
}

#[derive(Default)]
struct FakeBinLogState {
    groups: Vec<Vec<Vec<u8>>>,
    fail_appends: bool,
    current_index: i64,
}

/// Binlog that records appended groups in memory
///
/// `path_for` resolves inside `dir`, so shipping tests can lay out
/// binlog files by hand.
#[derive(Clone)]
pub struct FakeBinLog {
    dir: PathBuf,
    state: Arc<Mutex<FakeBinLogState>>,
}

impl FakeBinLog {
    pub fn new() -> Self {
        Self::in_dir(std::env::temp_dir().join("kvr-fake-binlog"))
    }

    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            state: Arc::new(Mutex::new(FakeBinLogState {
                current_index: 1,
                ..FakeBinLogState::default()
            })),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn set_current_index(&self, index: i64) {
        self.state.lock().current_index = index;
    }

    pub fn fail_appends(&self, fail: bool) {
        self.state.lock().fail_appends = fail;
    }

    /// Every appended group, oldest first
    pub fn groups(&self) -> Vec<Vec<Vec<u8>>> {
        self.state.lock().groups.clone()
    }
}

impl Default for FakeBinLog {
    fn default() -> Self {
        Self::new()
    }
}

impl BinLog for FakeBinLog {
    fn append(&self, events: &[Vec<u8>]) -> Result<(), BinLogError> {
        let mut state = self.state.lock();
        if state.fail_appends {
            return Err(BinLogError::Unavailable("injected failure".to_string()));
        }
        state.groups.push(events.to_vec());
        Ok(())
    }

    fn current_index(&self) -> i64 {
        self.state.lock().current_index
    }

    fn path_for(&self, index: i64) -> PathBuf {
        self.dir.join(crate::binlog::file_name(index))
    }
}
