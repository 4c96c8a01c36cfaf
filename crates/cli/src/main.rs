// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! kvr - replicated key-value store CLI

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{apply, dump, kv, ship};
use kvr_core::ReplConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "kvr",
    version,
    about = "kvr - Key-value store with binlog replication"
)]
struct Cli {
    /// Config file (TOML); defaults apply without it
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Set a key
    Put(kv::PutArgs),
    /// Delete a key
    Del(kv::DelArgs),
    /// Print the value of a key
    Get(kv::GetArgs),
    /// Apply a binlog-format frame stream
    Apply(apply::ApplyArgs),
    /// Ship the next group after a replica cursor
    Ship(ship::ShipArgs),
    /// List the frames of a binlog file
    Dump(dump::DumpArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging();

    let config = match &cli.config {
        Some(path) => ReplConfig::load(path)?,
        None => ReplConfig::default(),
    };

    match cli.command {
        Commands::Put(args) => kv::put(&config, args),
        Commands::Del(args) => kv::del(&config, args),
        Commands::Get(args) => kv::get(&config, args),
        Commands::Apply(args) => apply::apply(&config, args),
        Commands::Ship(args) => ship::ship(&config, args),
        Commands::Dump(args) => dump::dump(args),
    }
}

fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
