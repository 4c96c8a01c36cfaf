// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shipping reader: forward stored binlog frames to a catching-up replica
//!
//! Each call reopens the file named by the cursor, seeks to `log_pos` and
//! forwards the frames of exactly one group. When it meets the first frame
//! of the next group it stops without writing it and without moving the
//! cursor past it; the handle is dropped, and the next call re-reads that
//! header from the unchanged `log_pos`.
//!
//! A missing file is not an error. If it is the active file there is no
//! data yet; otherwise it was rotated away and the cursor is set to
//! [`RESYNC_INDEX`].

use crate::binlog::BinLog;
use crate::cursor::{ReplCursor, RESYNC_INDEX};
use crate::error::ReplError;
use crate::frame::{read_group_key, read_payload, read_u32, write_frame, FRAME_HEADER_LEN};
use crate::replicator::Replicator;
use crate::store::Store;
use std::fs::File;
use std::io::{self, BufReader, Seek, SeekFrom, Write};

impl<S: Store, L: BinLog> Replicator<S, L> {
    /// Ship the next group after `cursor`; returns bytes written
    ///
    /// With logging disabled there is nothing to ship and the cursor is
    /// reset to `{0, 0}`.
    pub fn ship_from<W: Write + ?Sized>(
        &self,
        cursor: &mut ReplCursor,
        writer: &mut W,
    ) -> Result<u64, ReplError> {
        match self.binlog() {
            Some(binlog) => ship_from(binlog, cursor, writer),
            None => {
                *cursor = ReplCursor::default();
                Ok(0)
            }
        }
    }
}

/// Ship the next group of `binlog` after `cursor`; returns bytes written
pub fn ship_from<L, W>(binlog: &L, cursor: &mut ReplCursor, writer: &mut W) -> Result<u64, ReplError>
where
    L: BinLog + ?Sized,
    W: Write + ?Sized,
{
    if cursor.needs_resync() {
        tracing::warn!("replica cursor needs full resync, nothing to ship");
        return Ok(0);
    }

    let index = cursor.log_file_index;
    let active = binlog.current_index();
    let path = binlog.path_for(index);

    let file = match File::open(&path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            if index == active {
                cursor.log_pos = 0;
            } else {
                tracing::warn!(index, active, path = %path.display(), "binlog file is gone, replica must resync");
                cursor.log_file_index = RESYNC_INDEX;
            }
            return Ok(0);
        }
        Err(e) => return Err(ReplError::StreamRead(e)),
    };

    let start = u64::try_from(cursor.log_pos).map_err(|_| {
        ReplError::StreamRead(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("negative binlog position {}", cursor.log_pos),
        ))
    })?;

    // Nothing new in the active file. A rotated file at its end still
    // falls through so the EOF below moves the cursor to the next file.
    let size = file.metadata().map_err(ReplError::StreamRead)?.len();
    if size == start && index >= active {
        return Ok(0);
    }

    let mut reader = BufReader::new(file);
    reader
        .seek(SeekFrom::Start(start))
        .map_err(ReplError::StreamRead)?;

    let mut marker = None;
    let mut written = 0u64;
    let mut payload = Vec::new();

    loop {
        let Some(group_key) = read_group_key(&mut reader).map_err(ReplError::StreamRead)? else {
            if index < active {
                cursor.log_file_index += 1;
                cursor.log_pos = 0;
                tracing::debug!(index, next = cursor.log_file_index, "binlog file exhausted, moving to next");
            }
            return Ok(written);
        };

        match marker {
            None => marker = Some(group_key),
            Some(current) if current != group_key => return Ok(written),
            Some(_) => {}
        }

        let len = read_u32(&mut reader).map_err(ReplError::StreamRead)?;
        read_payload(&mut reader, len, &mut payload).map_err(ReplError::StreamRead)?;
        write_frame(writer, group_key, &payload).map_err(ReplError::StreamWrite)?;

        let frame_len = FRAME_HEADER_LEN + u64::from(len);
        written += frame_len;
        cursor.log_pos += frame_len as i64;
    }
}

#[cfg(test)]
#[path = "ship_tests.rs"]
mod tests;
