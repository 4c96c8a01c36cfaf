// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `kvr dump <file>` - List the frames of a binlog file

use anyhow::{Context, Result};
use clap::Args;
use kvr_core::frame::read_frame;
use kvr_core::{Event, Frame};
use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Args)]
pub struct DumpArgs {
    /// Binlog or shipped frame file
    pub file: PathBuf,

    /// One JSON object per frame
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct FrameLine {
    group_key: u32,
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value_len: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl FrameLine {
    fn new(frame: &Frame) -> Self {
        let mut line = FrameLine {
            group_key: frame.group_key,
            kind: "invalid",
            key: None,
            value_len: None,
            error: None,
        };
        match Event::decode(&frame.payload) {
            Ok(event) => {
                line.kind = event.kind();
                line.key = Some(String::from_utf8_lossy(event.key()).into_owned());
                if let Event::Put { value, .. } = &event {
                    line.value_len = Some(value.len());
                }
            }
            Err(e) => line.error = Some(e.to_string()),
        }
        line
    }
}

impl fmt::Display for FrameLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<10} {:<7}", self.group_key, self.kind)?;
        if let Some(key) = &self.key {
            write!(f, " {}", key)?;
        }
        if let Some(len) = self.value_len {
            write!(f, " ({} bytes)", len)?;
        }
        if let Some(error) = &self.error {
            write!(f, " {}", error)?;
        }
        Ok(())
    }
}

pub fn dump(args: DumpArgs) -> Result<()> {
    let file = File::open(&args.file).with_context(|| format!("opening {}", args.file.display()))?;
    let mut reader = BufReader::new(file);

    while let Some(frame) = read_frame(&mut reader)? {
        let line = FrameLine::new(&frame);
        if args.json {
            println!("{}", serde_json::to_string(&line)?);
        } else {
            println!("{}", line);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "dump_tests.rs"]
mod tests;
