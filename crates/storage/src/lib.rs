// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! warden-storage: the embedded persistence layer. A write-ahead log plus
//! periodic zstd snapshots back an in-memory table set; this is the only
//! shared mutable resource in the daemon (spec §5).

pub mod error;
pub mod records;
pub mod snapshot;
pub mod store;
pub mod wal;

pub use error::StorageError;
pub use records::{ExecutionLogRecord, MemoryRecord, SelfEvaluationRecord};
pub use snapshot::Snapshot;
pub use store::{InMemoryStore, Store};
pub use wal::{Wal, WalRecord};
