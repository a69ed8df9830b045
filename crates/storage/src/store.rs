// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `Store` trait and its embedded, single-process default
//! implementation (spec §4.12). Each subsystem owns its own in-memory view
//! and only touches the store through its own table accessor.

use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use warden_core::{AuditEntry, ScheduledJob, Task, TaskId};

use crate::error::StorageError;
use crate::records::{ExecutionLogRecord, MemoryRecord, SelfEvaluationRecord};
use crate::snapshot::Snapshot;
use crate::wal::{Wal, WalRecord};

/// Durable append-and-read interface every subsystem persists through.
/// Implemented by [`InMemoryStore`]; any equivalent store (spec §6: "format
/// is semantic") can implement this trait.
pub trait Store: Send + Sync {
    fn upsert_task(&self, task: Task) -> Result<(), StorageError>;
    fn tasks(&self) -> Vec<Task>;
    fn task(&self, id: TaskId) -> Option<Task>;

    fn append_audit(&self, entry: AuditEntry) -> Result<(), StorageError>;
    fn audit_trail(&self) -> Vec<AuditEntry>;

    fn log_execution(&self, record: ExecutionLogRecord) -> Result<(), StorageError>;
    fn execution_log(&self) -> Vec<ExecutionLogRecord>;

    fn record_self_evaluation(&self, record: SelfEvaluationRecord) -> Result<(), StorageError>;
    fn self_evaluations(&self) -> Vec<SelfEvaluationRecord>;

    fn store_memory(&self, record: MemoryRecord) -> Result<(), StorageError>;
    fn memories(&self) -> Vec<MemoryRecord>;

    fn upsert_scheduled_job(&self, job: ScheduledJob) -> Result<(), StorageError>;
    fn scheduled_jobs(&self) -> Vec<ScheduledJob>;

    /// Force a snapshot of current state and truncate the WAL. Called
    /// periodically and on graceful shutdown.
    fn checkpoint(&self) -> Result<(), StorageError>;
}

#[derive(Default)]
struct Tables {
    tasks: indexmap_like::OrderedMap<TaskId, Task>,
    audit_trail: Vec<AuditEntry>,
    execution_log: Vec<ExecutionLogRecord>,
    self_evaluations: Vec<SelfEvaluationRecord>,
    memories: Vec<MemoryRecord>,
    scheduled_jobs: indexmap_like::OrderedMap<warden_core::ScheduledJobId, ScheduledJob>,
}

impl Tables {
    fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            tasks: self.tasks.values().cloned().collect(),
            audit_trail: self.audit_trail.clone(),
            execution_log: self.execution_log.clone(),
            self_evaluations: self.self_evaluations.clone(),
            memories: self.memories.clone(),
            scheduled_jobs: self.scheduled_jobs.values().cloned().collect(),
        }
    }

    fn apply(&mut self, record: WalRecord) {
        match record {
            WalRecord::TaskUpserted(task) => {
                self.tasks.insert(task.id, *task);
            }
            WalRecord::AuditAppended(entry) => self.audit_trail.push(*entry),
            WalRecord::ExecutionLogged(record) => self.execution_log.push(record),
            WalRecord::SelfEvaluationRecorded(record) => self.self_evaluations.push(record),
            WalRecord::MemoryStored(record) => self.memories.push(record),
            WalRecord::ScheduledJobUpserted(job) => {
                self.scheduled_jobs.insert(job.id, *job);
            }
        }
    }

    fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut tables = Tables::default();
        for task in snapshot.tasks {
            tables.tasks.insert(task.id, task);
        }
        tables.audit_trail = snapshot.audit_trail;
        tables.execution_log = snapshot.execution_log;
        tables.self_evaluations = snapshot.self_evaluations;
        tables.memories = snapshot.memories;
        for job in snapshot.scheduled_jobs {
            tables.scheduled_jobs.insert(job.id, job);
        }
        tables
    }
}

/// A minimal insertion-ordered map, avoiding a dependency on `indexmap` for
/// a handful of small tables this crate owns exclusively.
mod indexmap_like {
    use std::collections::HashMap;
    use std::hash::Hash;

    #[derive(Default)]
    pub struct OrderedMap<K, V> {
        order: Vec<K>,
        inner: HashMap<K, V>,
    }

    impl<K: Eq + Hash + Clone, V> OrderedMap<K, V> {
        pub fn insert(&mut self, key: K, value: V) {
            if !self.inner.contains_key(&key) {
                self.order.push(key.clone());
            }
            self.inner.insert(key, value);
        }

        pub fn values(&self) -> impl Iterator<Item = &V> {
            self.order.iter().filter_map(move |k| self.inner.get(k))
        }

        pub fn get(&self, key: &K) -> Option<&V> {
            self.inner.get(key)
        }
    }
}

/// Embedded, single-process store: in-memory tables guarded by a single
/// lock, durable through an append-only WAL plus periodic zstd snapshots
/// (teacher's `Wal` / `load_snapshot` / `MaterializedState` shape).
pub struct InMemoryStore {
    tables: RwLock<Tables>,
    wal: Wal,
    snapshot_path: PathBuf,
}

impl InMemoryStore {
    /// Boot path: load the last snapshot (if any), then replay the WAL tail
    /// written since that snapshot (spec §4.12 / C10 step 2).
    pub fn open(state_dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let state_dir = state_dir.as_ref();
        std::fs::create_dir_all(state_dir)?;
        let snapshot_path = state_dir.join("snapshot.zst");
        let wal = Wal::open(state_dir.join("wal.jsonl"))?;

        let mut tables = match Snapshot::read_from(&snapshot_path)? {
            Some(snapshot) => Tables::from_snapshot(snapshot),
            None => Tables::default(),
        };
        for record in wal.replay()? {
            tables.apply(record);
        }

        Ok(Self { tables: RwLock::new(tables), wal, snapshot_path })
    }
}

impl Store for InMemoryStore {
    fn upsert_task(&self, task: Task) -> Result<(), StorageError> {
        self.wal.append(&WalRecord::TaskUpserted(Box::new(task.clone())))?;
        self.tables.write().apply(WalRecord::TaskUpserted(Box::new(task)));
        Ok(())
    }

    fn tasks(&self) -> Vec<Task> {
        self.tables.read().tasks.values().cloned().collect()
    }

    fn task(&self, id: TaskId) -> Option<Task> {
        self.tables.read().tasks.get(&id).cloned()
    }

    fn append_audit(&self, entry: AuditEntry) -> Result<(), StorageError> {
        self.wal.append(&WalRecord::AuditAppended(Box::new(entry.clone())))?;
        self.tables.write().apply(WalRecord::AuditAppended(Box::new(entry)));
        Ok(())
    }

    fn audit_trail(&self) -> Vec<AuditEntry> {
        self.tables.read().audit_trail.clone()
    }

    fn log_execution(&self, record: ExecutionLogRecord) -> Result<(), StorageError> {
        self.wal.append(&WalRecord::ExecutionLogged(record.clone()))?;
        self.tables.write().apply(WalRecord::ExecutionLogged(record));
        Ok(())
    }

    fn execution_log(&self) -> Vec<ExecutionLogRecord> {
        self.tables.read().execution_log.clone()
    }

    fn record_self_evaluation(&self, record: SelfEvaluationRecord) -> Result<(), StorageError> {
        self.wal.append(&WalRecord::SelfEvaluationRecorded(record.clone()))?;
        self.tables.write().apply(WalRecord::SelfEvaluationRecorded(record));
        Ok(())
    }

    fn self_evaluations(&self) -> Vec<SelfEvaluationRecord> {
        self.tables.read().self_evaluations.clone()
    }

    fn store_memory(&self, record: MemoryRecord) -> Result<(), StorageError> {
        self.wal.append(&WalRecord::MemoryStored(record.clone()))?;
        self.tables.write().apply(WalRecord::MemoryStored(record));
        Ok(())
    }

    fn memories(&self) -> Vec<MemoryRecord> {
        self.tables.read().memories.clone()
    }

    fn upsert_scheduled_job(&self, job: ScheduledJob) -> Result<(), StorageError> {
        self.wal.append(&WalRecord::ScheduledJobUpserted(Box::new(job.clone())))?;
        self.tables.write().apply(WalRecord::ScheduledJobUpserted(Box::new(job)));
        Ok(())
    }

    fn scheduled_jobs(&self) -> Vec<ScheduledJob> {
        self.tables.read().scheduled_jobs.values().cloned().collect()
    }

    fn checkpoint(&self) -> Result<(), StorageError> {
        let snapshot = self.tables.read().to_snapshot();
        snapshot.write_to(&self.snapshot_path)?;
        self.wal.truncate()?;
        tracing::info!(entries = snapshot.audit_trail.len(), "checkpointed store");
        Ok(())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
