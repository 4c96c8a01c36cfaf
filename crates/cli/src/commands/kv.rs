// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `kvr put|del|get` - Local reads and writes

use super::open_replicator;
use anyhow::{bail, Result};
use clap::Args;
use kvr_core::{ReplConfig, Store};
use kvr_storage::KvStore;

#[derive(Args)]
pub struct PutArgs {
    pub key: String,
    pub value: String,
}

#[derive(Args)]
pub struct DelArgs {
    pub key: String,
}

#[derive(Args)]
pub struct GetArgs {
    pub key: String,
}

pub fn put(config: &ReplConfig, args: PutArgs) -> Result<()> {
    let repl = open_replicator(config)?;
    let mut batch = repl.begin();
    batch.put(args.key.as_bytes(), args.value.as_bytes())?;
    batch.commit()?;
    Ok(())
}

pub fn del(config: &ReplConfig, args: DelArgs) -> Result<()> {
    let repl = open_replicator(config)?;
    let mut batch = repl.begin();
    batch.delete(args.key.as_bytes());
    batch.commit()?;
    Ok(())
}

/// Reads go straight to the store; no binlog is opened
pub fn get(config: &ReplConfig, args: GetArgs) -> Result<()> {
    let store = KvStore::open(&config.store.path)?;
    match store.get(args.key.as_bytes()) {
        Some(value) => {
            println!("{}", String::from_utf8_lossy(&value));
            Ok(())
        }
        None => bail!("not found: {}", args.key),
    }
}
