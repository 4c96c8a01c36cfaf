// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the replication engine

use crate::binlog::BinLogError;
use crate::store::StoreError;
use std::io;
use thiserror::Error;

/// Errors decoding a single binlog event payload
#[derive(Debug, Error)]
pub enum EventError {
    #[error("empty event")]
    Empty,
    #[error("unknown event tag {0:#04x}")]
    UnknownTag(u8),
    #[error("malformed put event ({len} bytes)")]
    MalformedPut { len: usize },
    #[error("malformed delete event")]
    MalformedDelete,
    #[error("key too long: {0} bytes")]
    KeyTooLong(usize),
}

/// Errors raised while applying or shipping a frame stream
///
/// `InvalidEvent` is scoped to one frame and `StoreCommit`/`LogAppend` to
/// one group; the apply driver contains those. `StreamRead` and
/// `StreamWrite` end the whole call.
#[derive(Debug, Error)]
pub enum ReplError {
    #[error("invalid event: {0}")]
    InvalidEvent(#[from] EventError),
    #[error("stream read failed: {0}")]
    StreamRead(#[source] io::Error),
    #[error("stream write failed: {0}")]
    StreamWrite(#[source] io::Error),
    #[error("store commit failed: {0}")]
    StoreCommit(#[from] StoreError),
    #[error("binlog append failed: {0}")]
    LogAppend(#[from] BinLogError),
}
