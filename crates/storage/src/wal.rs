// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Write-ahead log: one domain event per line, appended and fsynced before
//! the in-memory tables are mutated. Boot replays the last snapshot, then
//! the WAL tail written since that snapshot (spec §4.12).

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use warden_core::{AuditEntry, ScheduledJob, Task};

use crate::error::StorageError;
use crate::records::{ExecutionLogRecord, MemoryRecord, SelfEvaluationRecord};

/// One mutation to a table, as appended to the WAL. Replaying a sequence of
/// these in order reconstructs the in-memory tables.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub enum WalRecord {
    TaskUpserted(Box<Task>),
    AuditAppended(Box<AuditEntry>),
    ExecutionLogged(ExecutionLogRecord),
    SelfEvaluationRecorded(SelfEvaluationRecord),
    MemoryStored(MemoryRecord),
    ScheduledJobUpserted(Box<ScheduledJob>),
}

pub struct Wal {
    path: PathBuf,
    file: Mutex<File>,
}

impl Wal {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self { path, file: Mutex::new(file) })
    }

    /// Append one record, flushing and fsyncing before returning so a crash
    /// immediately after `append` cannot lose it (spec §4.12 durability).
    pub fn append(&self, record: &WalRecord) -> Result<(), StorageError> {
        let line = serde_json::to_string(record)?;
        let mut file = self.file.lock();
        writeln!(file, "{line}")?;
        file.flush()?;
        file.sync_data()?;
        Ok(())
    }

    /// Replay every record currently on disk, in append order.
    pub fn replay(&self) -> Result<Vec<WalRecord>, StorageError> {
        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut out = Vec::new();
        for (offset, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record: WalRecord = serde_json::from_str(&line).map_err(|e| {
                StorageError::CorruptWal { offset: offset as u64, reason: e.to_string() }
            })?;
            out.push(record);
        }
        Ok(out)
    }

    /// Truncate the WAL after a snapshot has durably captured its contents.
    pub fn truncate(&self) -> Result<(), StorageError> {
        let mut file = self.file.lock();
        file.set_len(0)?;
        use std::io::Seek;
        file.seek(std::io::SeekFrom::Start(0))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "wal_tests.rs"]
mod tests;
