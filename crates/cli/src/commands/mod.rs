// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod apply;
pub mod dump;
pub mod kv;
pub mod ship;

use anyhow::{Context, Result};
use kvr_core::{ReplConfig, Replicator, SystemClock};
use kvr_storage::{FileBinLog, KvStore};

pub type LocalReplicator = Replicator<KvStore, FileBinLog<SystemClock>>;

/// Open the configured store with its binlog
pub fn open_replicator(config: &ReplConfig) -> Result<LocalReplicator> {
    let store = KvStore::open(&config.store.path)
        .with_context(|| format!("opening store {}", config.store.path.display()))?;
    let binlog = open_binlog(config)?;
    Ok(Replicator::with_binlog(store, binlog).with_read_buffer_size(config.apply.read_buffer_size))
}

pub fn open_binlog(config: &ReplConfig) -> Result<FileBinLog<SystemClock>> {
    FileBinLog::open(config.binlog.clone(), SystemClock)
        .with_context(|| format!("opening binlog {}", config.binlog.dir.display()))
}
