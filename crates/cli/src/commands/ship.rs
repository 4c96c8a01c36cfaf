// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `kvr ship` - Forward the next binlog group to a replica

use super::open_binlog;
use anyhow::{bail, Context, Result};
use clap::Args;
use kvr_core::{ship, BinLog, ReplConfig, ReplCursor};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Args)]
pub struct ShipArgs {
    /// Replica cursor file (JSON); created on first use
    #[arg(long)]
    pub cursor: PathBuf,

    /// Append shipped frames to this file instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn ship(config: &ReplConfig, args: ShipArgs) -> Result<()> {
    let binlog = open_binlog(config)?;
    let mut cursor = ReplCursor::load(&args.cursor)
        .with_context(|| format!("loading cursor {}", args.cursor.display()))?;

    // A fresh replica starts at the oldest file still on disk
    if cursor == ReplCursor::default() {
        let first = binlog.indexes()?.first().copied();
        cursor.log_file_index = first.unwrap_or_else(|| binlog.current_index());
    }

    // The cursor only advances past frames already handed to the
    // writer, so it is saved even when shipping fails
    let shipped = match &args.out {
        Some(path) => {
            let mut file = OpenOptions::new().create(true).append(true).open(path)?;
            ship_and_flush(&binlog, &mut cursor, &mut file)
        }
        None => ship_and_flush(&binlog, &mut cursor, &mut io::stdout().lock()),
    };

    cursor.save(&args.cursor)?;
    let written = shipped?;
    if cursor.needs_resync() {
        bail!("replica fell behind purged binlog files and needs a full resync");
    }

    eprintln!(
        "Shipped {} bytes, cursor at {}:{}",
        written, cursor.log_file_index, cursor.log_pos
    );
    Ok(())
}

fn ship_and_flush<L: BinLog, W: Write>(
    binlog: &L,
    cursor: &mut ReplCursor,
    writer: &mut W,
) -> Result<u64> {
    let written = ship::ship_from(binlog, cursor, writer)?;
    writer.flush()?;
    Ok(written)
}
