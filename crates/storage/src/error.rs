// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("snapshot codec error: {0}")]
    Snapshot(String),

    #[error("wal record at offset {offset} is corrupt: {reason}")]
    CorruptWal { offset: u64, reason: String },
}
