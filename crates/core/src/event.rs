// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Binlog event payloads
//!
//! Byte 0 of a frame payload selects the event kind:
//!
//! ```text
//! DELETE  [0x00][key...]
//! PUT     [0x01][key_len:2 BE][key][value...]
//! ```

use crate::error::EventError;

pub const TAG_DELETE: u8 = 0x00;
pub const TAG_PUT: u8 = 0x01;

/// A decoded mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Put { key: Vec<u8>, value: Vec<u8> },
    Delete { key: Vec<u8> },
}

impl Event {
    /// Decode a raw payload, dispatching on the tag byte
    pub fn decode(raw: &[u8]) -> Result<Self, EventError> {
        match raw.first() {
            None => Err(EventError::Empty),
            Some(&TAG_PUT) => {
                let (key, value) = decode_put(raw)?;
                Ok(Event::Put {
                    key: key.to_vec(),
                    value: value.to_vec(),
                })
            }
            Some(&TAG_DELETE) => Ok(Event::Delete {
                key: decode_delete(raw)?.to_vec(),
            }),
            Some(&tag) => Err(EventError::UnknownTag(tag)),
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>, EventError> {
        match self {
            Event::Put { key, value } => encode_put(key, value),
            Event::Delete { key } => Ok(encode_delete(key)),
        }
    }

    pub fn key(&self) -> &[u8] {
        match self {
            Event::Put { key, .. } | Event::Delete { key } => key,
        }
    }

    /// Short name for logs and tooling
    pub fn kind(&self) -> &'static str {
        match self {
            Event::Put { .. } => "put",
            Event::Delete { .. } => "delete",
        }
    }
}

pub fn encode_put(key: &[u8], value: &[u8]) -> Result<Vec<u8>, EventError> {
    let key_len = u16::try_from(key.len()).map_err(|_| EventError::KeyTooLong(key.len()))?;
    let mut buf = Vec::with_capacity(3 + key.len() + value.len());
    buf.push(TAG_PUT);
    buf.extend_from_slice(&key_len.to_be_bytes());
    buf.extend_from_slice(key);
    buf.extend_from_slice(value);
    Ok(buf)
}

pub fn encode_delete(key: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(1 + key.len());
    buf.push(TAG_DELETE);
    buf.extend_from_slice(key);
    buf
}

/// Split a PUT payload into borrowed key and value
pub fn decode_put(raw: &[u8]) -> Result<(&[u8], &[u8]), EventError> {
    let malformed = || EventError::MalformedPut { len: raw.len() };
    if raw.len() < 3 || raw[0] != TAG_PUT {
        return Err(malformed());
    }
    let key_len = u16::from_be_bytes([raw[1], raw[2]]) as usize;
    let rest = &raw[3..];
    if key_len > rest.len() {
        return Err(malformed());
    }
    Ok(rest.split_at(key_len))
}

/// Borrow the key of a DELETE payload
pub fn decode_delete(raw: &[u8]) -> Result<&[u8], EventError> {
    match raw.split_first() {
        Some((&TAG_DELETE, key)) => Ok(key),
        _ => Err(EventError::MalformedDelete),
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
