// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Binlog frame codec
//!
//! The same framing is used by binlog files on disk, by the stream a
//! replica applies, and by the stream the master ships:
//!
//! ```text
//! [group_key:4 BE][payload_len:4 BE][payload:N]
//! ```
//!
//! A stream is a plain concatenation of frames. End of input is only
//! clean when it falls exactly before a group key; anything shorter is
//! reported as `UnexpectedEof`.

use crate::error::ReplError;
use std::io::{self, Read, Write};

/// Size of the two big-endian header fields
pub const FRAME_HEADER_LEN: u64 = 8;

/// A decoded frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub group_key: u32,
    pub payload: Vec<u8>,
}

/// What the scanning loop should do after a handler ran
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameAction {
    /// The frame was handled
    Continue,
    /// The frame's effects were dropped; keep reading the stream
    Skip,
}

/// Counts from one [`for_each_frame`] scan
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    pub frames: u64,
    pub skipped: u64,
}

/// Read a group key, or `None` if the stream ended exactly here
pub fn read_group_key<R: Read + ?Sized>(reader: &mut R) -> io::Result<Option<u32>> {
    let mut buf = [0u8; 4];
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) if filled == 0 => return Ok(None),
            Ok(0) => {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("truncated group key ({} of 4 bytes)", filled),
                ))
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(Some(u32::from_be_bytes(buf)))
}

/// Read a big-endian u32 that must be present
pub fn read_u32<R: Read + ?Sized>(reader: &mut R) -> io::Result<u32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_be_bytes(buf))
}

/// Read exactly `len` payload bytes into `buf`, replacing its contents
///
/// Reads through `take` so a corrupt length cannot force a huge
/// allocation before the stream runs dry.
pub fn read_payload<R: Read + ?Sized>(
    reader: &mut R,
    len: u32,
    buf: &mut Vec<u8>,
) -> io::Result<()> {
    buf.clear();
    let read = (&mut *reader).take(u64::from(len)).read_to_end(buf)?;
    if read != len as usize {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("truncated payload ({} of {} bytes)", read, len),
        ));
    }
    Ok(())
}

/// Read one frame, or `None` on clean end of stream
pub fn read_frame<R: Read + ?Sized>(reader: &mut R) -> Result<Option<Frame>, ReplError> {
    let Some(group_key) = read_group_key(reader).map_err(ReplError::StreamRead)? else {
        return Ok(None);
    };
    let len = read_u32(reader).map_err(ReplError::StreamRead)?;
    let mut payload = Vec::new();
    read_payload(reader, len, &mut payload).map_err(ReplError::StreamRead)?;
    Ok(Some(Frame { group_key, payload }))
}

/// Write one frame: both headers big-endian, then the raw payload
pub fn write_frame<W: Write + ?Sized>(
    writer: &mut W,
    group_key: u32,
    payload: &[u8],
) -> io::Result<()> {
    let len = u32::try_from(payload.len()).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("payload too large for a frame: {} bytes", payload.len()),
        )
    })?;
    writer.write_all(&group_key.to_be_bytes())?;
    writer.write_all(&len.to_be_bytes())?;
    writer.write_all(payload)
}

/// Encode a frame into a fresh buffer
///
/// Fails like [`write_frame`] when the payload does not fit a `u32` length.
pub fn encode_frame(group_key: u32, payload: &[u8]) -> io::Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(FRAME_HEADER_LEN as usize + payload.len());
    write_frame(&mut buf, group_key, payload)?;
    Ok(buf)
}

/// Invoke `handler` for every frame until clean end of stream
///
/// `Ok(FrameAction::Skip)` drops only that frame and the scan carries on.
/// An `Err` from the handler or from the stream stops the scan and is
/// returned as-is.
pub fn for_each_frame<R, F>(reader: &mut R, mut handler: F) -> Result<ScanSummary, ReplError>
where
    R: Read + ?Sized,
    F: FnMut(u32, &[u8]) -> Result<FrameAction, ReplError>,
{
    let mut summary = ScanSummary::default();
    let mut payload = Vec::new();

    loop {
        let Some(group_key) = read_group_key(reader).map_err(ReplError::StreamRead)? else {
            return Ok(summary);
        };
        let len = read_u32(reader).map_err(ReplError::StreamRead)?;
        read_payload(reader, len, &mut payload).map_err(ReplError::StreamRead)?;

        summary.frames += 1;
        if handler(group_key, &payload)? == FrameAction::Skip {
            summary.skipped += 1;
        }
    }
}

#[cfg(test)]
#[path = "frame_tests.rs"]
mod tests;
