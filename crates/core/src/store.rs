// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Key/value store seam
//!
//! The engine only needs an ordered key space that can stage puts and
//! deletes and commit them all at once.

use std::io;
use thiserror::Error;

/// Errors from a store commit
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("commit rejected: {0}")]
    Rejected(String),
}

/// A staged set of mutations against one store
///
/// After `commit` or `rollback` returns the batch holds nothing and can
/// stage the next group.
pub trait WriteBatch: Send {
    fn put(&mut self, key: &[u8], value: &[u8]);
    fn delete(&mut self, key: &[u8]);
    fn commit(&mut self) -> Result<(), StoreError>;
    fn rollback(&mut self);
}

/// A key/value store that hands out write batches
pub trait Store: Send + Sync {
    type Batch: WriteBatch;

    fn write_batch(&self) -> Self::Batch;
    fn get(&self, key: &[u8]) -> Option<Vec<u8>>;
}
