// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rotating file binlog
//!
//! Each append becomes one group: every event is written as a frame
//! stamped with the same clock reading. Once the active file reaches
//! `max_file_size` the index advances and the next append creates the
//! new file; files beyond `max_file_count` are purged oldest first.
//!
//! A group that fails to write is cut back off the file. A file left with
//! a partial frame by a crash is truncated to its last whole frame when
//! it is next opened for appending.

use kvr_core::binlog::{file_name, parse_file_name};
use kvr_core::frame::{read_group_key, read_u32, write_frame, FRAME_HEADER_LEN};
use kvr_core::{BinLog, BinLogConfig, BinLogError, Clock, SystemClock};
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};

struct Active {
    index: i64,
    file: Option<File>,
    size: u64,
}

/// Binlog stored as `binlog.NNNNNNN` files in one directory
pub struct FileBinLog<C: Clock = SystemClock> {
    config: BinLogConfig,
    clock: C,
    active: Mutex<Active>,
}

impl<C: Clock> FileBinLog<C> {
    /// Open the binlog directory, resuming at the highest existing index
    pub fn open(config: BinLogConfig, clock: C) -> Result<Self, BinLogError> {
        fs::create_dir_all(&config.dir)?;
        let index = list_indexes(&config.dir)?.last().copied().unwrap_or(1);
        tracing::debug!(dir = %config.dir.display(), index, "opened binlog");

        Ok(Self {
            config,
            clock,
            active: Mutex::new(Active {
                index,
                file: None,
                size: 0,
            }),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.config.dir
    }

    /// Indexes of the binlog files currently on disk, ascending
    pub fn indexes(&self) -> Result<Vec<i64>, BinLogError> {
        Ok(list_indexes(&self.config.dir)?)
    }

    fn open_active(&self, active: &mut Active) -> io::Result<()> {
        let path = self.path_for(active.index);
        let file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&path)?;
        let len = file.metadata()?.len();
        let whole = whole_frames_len(&file)?;
        if whole < len {
            tracing::warn!(
                path = %path.display(),
                torn_bytes = len - whole,
                "truncating partial frame at end of binlog file"
            );
            file.set_len(whole)?;
        }
        active.size = whole;
        active.file = Some(file);
        Ok(())
    }

    /// Cut a failed group back off the active file and drop the handle
    fn discard_failed_write(&self, active: &mut Active) {
        if let Some(file) = active.file.take() {
            if let Err(e) = file.set_len(active.size) {
                tracing::warn!(
                    index = active.index,
                    error = %e,
                    "failed to truncate binlog after failed append; repairing on reopen"
                );
            }
        }
    }

    fn rotate(&self, active: &mut Active) {
        active.file = None;
        active.size = 0;
        active.index += 1;
        tracing::debug!(next = active.index, "rotated binlog");

        if let Err(e) = self.purge() {
            tracing::warn!(error = %e, "failed to purge old binlog files");
        }
    }

    fn purge(&self) -> io::Result<()> {
        let indexes = list_indexes(&self.config.dir)?;
        let excess = indexes.len().saturating_sub(self.config.max_file_count);
        for index in &indexes[..excess] {
            let path = self.path_for(*index);
            fs::remove_file(&path)?;
            tracing::debug!(path = %path.display(), "purged binlog file");
        }
        Ok(())
    }
}

impl<C: Clock> BinLog for FileBinLog<C> {
    fn append(&self, events: &[Vec<u8>]) -> Result<(), BinLogError> {
        if events.is_empty() {
            return Ok(());
        }
        if let Some(big) = events.iter().find(|e| u32::try_from(e.len()).is_err()) {
            return Err(BinLogError::EventTooLarge(big.len()));
        }

        let mut active = self.active.lock();
        if active.file.is_none() {
            self.open_active(&mut active)?;
        }

        let group_key = self.clock.unix_secs();
        let mut buf = Vec::new();
        for event in events {
            write_frame(&mut buf, group_key, event)?;
        }
        let result = match active.file.as_mut() {
            Some(file) => write_group(file, &buf, self.config.sync_on_append),
            None => Ok(()),
        };
        if let Err(e) = result {
            self.discard_failed_write(&mut active);
            return Err(e.into());
        }
        let written = buf.len() as u64;
        active.size += written;
        tracing::trace!(group_key, events = events.len(), bytes = written, "appended binlog group");

        if active.size >= self.config.max_file_size {
            self.rotate(&mut active);
        }
        Ok(())
    }

    fn current_index(&self) -> i64 {
        self.active.lock().index
    }

    fn path_for(&self, index: i64) -> PathBuf {
        self.config.dir.join(file_name(index))
    }
}

fn write_group(file: &mut File, buf: &[u8], sync: bool) -> io::Result<()> {
    file.write_all(buf)?;
    file.flush()?;
    if sync {
        file.sync_data()?;
    }
    Ok(())
}

/// Length of the prefix of `file` made of whole frames
fn whole_frames_len(file: &File) -> io::Result<u64> {
    let mut reader = BufReader::new(file);
    let mut whole = 0u64;
    loop {
        match frame_len(&mut reader) {
            Ok(Some(len)) => whole += len,
            Ok(None) => return Ok(whole),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(whole),
            Err(e) => return Err(e),
        }
    }
}

/// Skip over one frame, returning its encoded length
fn frame_len<R: Read>(reader: &mut R) -> io::Result<Option<u64>> {
    if read_group_key(reader)?.is_none() {
        return Ok(None);
    }
    let len = u64::from(read_u32(reader)?);
    let skipped = io::copy(&mut reader.by_ref().take(len), &mut io::sink())?;
    if skipped < len {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("truncated payload ({} of {} bytes)", skipped, len),
        ));
    }
    Ok(Some(FRAME_HEADER_LEN + len))
}

fn list_indexes(dir: &Path) -> io::Result<Vec<i64>> {
    let mut indexes = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if let Some(index) = entry.file_name().to_str().and_then(parse_file_name) {
            indexes.push(index);
        }
    }
    indexes.sort_unstable();
    Ok(indexes)
}

#[cfg(test)]
#[path = "binlog_tests.rs"]
mod tests;
