// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `kvr apply <file>` - Replay a shipped frame stream onto this store

use super::open_replicator;
use anyhow::Result;
use clap::Args;
use kvr_core::ReplConfig;
use std::io;
use std::path::PathBuf;

#[derive(Args)]
pub struct ApplyArgs {
    /// Frame stream file, or `-` for stdin
    pub input: PathBuf,
}

pub fn apply(config: &ReplConfig, args: ApplyArgs) -> Result<()> {
    let repl = open_replicator(config)?;

    let report = if args.input.as_os_str() == "-" {
        repl.apply_from_reader(io::stdin().lock())?
    } else {
        repl.apply_from_file(&args.input)?
    };

    println!(
        "Applied {} frames: {} groups committed, {} groups failed, {} frames skipped",
        report.frames, report.groups_committed, report.groups_failed, report.skipped_frames
    );
    Ok(())
}
