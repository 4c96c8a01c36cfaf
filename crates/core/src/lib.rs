//! kvr-core: replication engine for the kvr key-value store
//!
//! This crate provides:
//! - The binlog frame codec and event payload codec
//! - Transaction batches that mirror store writes into a binlog
//! - The apply driver that replays a frame stream onto a replica
//! - The shipping reader that forwards one group per call from a cursor
//! - Store and binlog traits implemented by `kvr-storage`

pub mod apply;
pub mod batch;
pub mod binlog;
pub mod clock;
pub mod config;
pub mod cursor;
pub mod error;
pub mod event;
pub mod frame;
pub mod replicator;
pub mod ship;
pub mod store;

#[cfg(any(test, feature = "test-support"))]
pub mod fake;

// Re-exports
pub use apply::ApplyReport;
pub use batch::ReplBatch;
pub use binlog::{BinLog, BinLogError, NoBinLog};
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{ApplyConfig, BinLogConfig, ConfigError, ReplConfig, StoreConfig};
pub use cursor::{CursorError, ReplCursor, RESYNC_INDEX};
pub use error::{EventError, ReplError};
pub use event::Event;
pub use frame::{Frame, FrameAction, ScanSummary};
pub use replicator::Replicator;
pub use store::{Store, StoreError, WriteBatch};
