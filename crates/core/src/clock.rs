// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for binlog group keys

use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

/// A clock that provides the current time in whole seconds
///
/// Binlog writers stamp every frame of one append with the same reading,
/// which is what makes the append a single group on the replica.
pub trait Clock: Clone + Send + Sync {
    fn unix_secs(&self) -> u32;
}

/// Real system clock
#[derive(Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_secs(&self) -> u32 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| secs_to_key(d.as_secs()))
            .unwrap_or(0)
    }
}

/// Saturate at `u32::MAX` past 2106 rather than wrapping to a small key
fn secs_to_key(secs: u64) -> u32 {
    u32::try_from(secs).unwrap_or(u32::MAX)
}

/// Fake clock for testing with controllable time
#[derive(Clone)]
pub struct FakeClock {
    current: Arc<Mutex<u32>>,
}

impl FakeClock {
    pub fn new(secs: u32) -> Self {
        Self {
            current: Arc::new(Mutex::new(secs)),
        }
    }

    /// Advance the clock by the given number of seconds
    pub fn advance(&self, secs: u32) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current = current.saturating_add(secs);
    }

    /// Set the clock to a specific second
    pub fn set(&self, secs: u32) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current = secs;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Clock for FakeClock {
    fn unix_secs(&self) -> u32 {
        *self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
