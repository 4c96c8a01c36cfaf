// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ordered key/value store with an optional JSON snapshot

use kvr_core::{Store, StoreError, WriteBatch};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

type KeySpace = BTreeMap<Vec<u8>, Vec<u8>>;

struct Inner {
    data: RwLock<KeySpace>,
    snapshot: Option<PathBuf>,
}

/// Key/value store shared between handles and write batches
#[derive(Clone)]
pub struct KvStore {
    inner: Arc<Inner>,
}

impl KvStore {
    /// A store that lives only in memory
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(Inner {
                data: RwLock::new(KeySpace::new()),
                snapshot: None,
            }),
        }
    }

    /// Open a store persisted at `path`; a missing file is an empty store
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = match fs::read(path) {
            Ok(bytes) => {
                let snapshot: Snapshot = serde_json::from_slice(&bytes)?;
                snapshot.entries.into_iter().collect()
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => KeySpace::new(),
            Err(e) => return Err(e.into()),
        };
        tracing::debug!(path = %path.display(), keys = data.len(), "opened store");

        Ok(Self {
            inner: Arc::new(Inner {
                data: RwLock::new(data),
                snapshot: Some(path.to_path_buf()),
            }),
        })
    }

    pub fn len(&self) -> usize {
        self.inner.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.data.read().is_empty()
    }

    /// All entries in key order
    pub fn entries(&self) -> Vec<(Vec<u8>, Vec<u8>)> {
        self.inner
            .data
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl Store for KvStore {
    type Batch = KvWriteBatch;

    fn write_batch(&self) -> KvWriteBatch {
        KvWriteBatch {
            inner: Arc::clone(&self.inner),
            ops: Vec::new(),
        }
    }

    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.inner.data.read().get(key).cloned()
    }
}

enum Op {
    Put(Vec<u8>, Vec<u8>),
    Delete(Vec<u8>),
}

/// Mutations staged against a [`KvStore`], applied in order on commit
pub struct KvWriteBatch {
    inner: Arc<Inner>,
    ops: Vec<Op>,
}

impl WriteBatch for KvWriteBatch {
    fn put(&mut self, key: &[u8], value: &[u8]) {
        self.ops.push(Op::Put(key.to_vec(), value.to_vec()));
    }

    fn delete(&mut self, key: &[u8]) {
        self.ops.push(Op::Delete(key.to_vec()));
    }

    fn commit(&mut self) -> Result<(), StoreError> {
        let ops = std::mem::take(&mut self.ops);
        let mut data = self.inner.data.write();

        let Some(path) = &self.inner.snapshot else {
            apply_ops(&mut data, ops);
            return Ok(());
        };

        // Persist the post-commit state first; memory only changes once it is on disk
        let mut next = data.clone();
        apply_ops(&mut next, ops);
        write_snapshot(path, &next)?;
        *data = next;
        Ok(())
    }

    fn rollback(&mut self) {
        self.ops.clear();
    }
}

fn apply_ops(data: &mut KeySpace, ops: Vec<Op>) {
    for op in ops {
        match op {
            Op::Put(key, value) => {
                data.insert(key, value);
            }
            Op::Delete(key) => {
                data.remove(&key);
            }
        }
    }
}

#[derive(Serialize, Deserialize)]
struct Snapshot {
    entries: Vec<(Vec<u8>, Vec<u8>)>,
}

fn write_snapshot(path: &Path, data: &KeySpace) -> Result<(), StoreError> {
    let snapshot = Snapshot {
        entries: data.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
    };
    let json = serde_json::to_vec(&snapshot)?;
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
#[path = "kv_store_tests.rs"]
mod tests;
