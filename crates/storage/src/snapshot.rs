// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Periodic zstd-compressed snapshot of the materialized tables, so boot
//! doesn't have to replay an unbounded WAL (spec §4.12).

use std::fs;
use std::path::Path;

use warden_core::{AuditEntry, ScheduledJob, Task};

use crate::error::StorageError;
use crate::records::{ExecutionLogRecord, MemoryRecord, SelfEvaluationRecord};

const ZSTD_LEVEL: i32 = 3;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Snapshot {
    pub tasks: Vec<Task>,
    pub audit_trail: Vec<AuditEntry>,
    pub execution_log: Vec<ExecutionLogRecord>,
    pub self_evaluations: Vec<SelfEvaluationRecord>,
    pub memories: Vec<MemoryRecord>,
    pub scheduled_jobs: Vec<ScheduledJob>,
}

impl Snapshot {
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), StorageError> {
        let json = serde_json::to_vec(self)?;
        let compressed =
            zstd::encode_all(json.as_slice(), ZSTD_LEVEL).map_err(|e| StorageError::Snapshot(e.to_string()))?;
        let tmp = path.as_ref().with_extension("tmp");
        fs::write(&tmp, compressed)?;
        fs::rename(&tmp, path.as_ref())?;
        Ok(())
    }

    pub fn read_from(path: impl AsRef<Path>) -> Result<Option<Self>, StorageError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }
        let compressed = fs::read(path)?;
        let json =
            zstd::decode_all(compressed.as_slice()).map_err(|e| StorageError::Snapshot(e.to_string()))?;
        let snapshot = serde_json::from_slice(&json)?;
        Ok(Some(snapshot))
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
