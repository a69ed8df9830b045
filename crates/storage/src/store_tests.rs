// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use warden_core::{Priority, TaskType, Value, GENESIS_HASH};

fn sample_task() -> Task {
    Task::new(TaskType::ToolInvocation, Priority::Medium, "t", "d", Value::Null, 0)
}

#[test]
fn upserted_task_is_visible_immediately() {
    let dir = tempfile::tempdir().unwrap();
    let store = InMemoryStore::open(dir.path()).unwrap();
    let task = sample_task();
    store.upsert_task(task.clone()).unwrap();
    assert_eq!(store.task(task.id).unwrap().id, task.id);
    assert_eq!(store.tasks().len(), 1);
}

#[test]
fn reopen_without_checkpoint_replays_wal() {
    let dir = tempfile::tempdir().unwrap();
    let task = sample_task();
    {
        let store = InMemoryStore::open(dir.path()).unwrap();
        store.upsert_task(task.clone()).unwrap();
    }
    let store = InMemoryStore::open(dir.path()).unwrap();
    assert_eq!(store.tasks().len(), 1);
    assert_eq!(store.task(task.id).unwrap().id, task.id);
}

#[test]
fn checkpoint_then_reopen_preserves_state_and_empties_wal() {
    let dir = tempfile::tempdir().unwrap();
    let task = sample_task();
    {
        let store = InMemoryStore::open(dir.path()).unwrap();
        store.upsert_task(task.clone()).unwrap();
        let entry = AuditEntry::next(GENESIS_HASH, 1, 0, "system", "boot", "app", Value::Null);
        store.append_audit(entry).unwrap();
        store.checkpoint().unwrap();
    }
    let store = InMemoryStore::open(dir.path()).unwrap();
    assert_eq!(store.tasks().len(), 1);
    assert_eq!(store.audit_trail().len(), 1);
}

#[test]
fn boot_shutdown_boot_preserves_audit_chain_validity_and_count() {
    let dir = tempfile::tempdir().unwrap();
    {
        let store = InMemoryStore::open(dir.path()).unwrap();
        let e1 = AuditEntry::next(GENESIS_HASH, 1, 0, "system", "boot", "app", Value::Null);
        let e2 = AuditEntry::next(&e1.hash, 2, 1, "a1", "task_start", "t1", Value::Null);
        store.append_audit(e1).unwrap();
        store.append_audit(e2).unwrap();
        store.checkpoint().unwrap();
    }
    let store = InMemoryStore::open(dir.path()).unwrap();
    let trail = store.audit_trail();
    assert_eq!(trail.len(), 2);
    assert!(trail.iter().all(|e| e.is_self_consistent()));
}
