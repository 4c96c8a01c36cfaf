// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! kvr-storage: file-backed store and rotating binlog for kvr

mod binlog;
mod kv_store;

pub use binlog::FileBinLog;
pub use kv_store::{KvStore, KvWriteBatch};
