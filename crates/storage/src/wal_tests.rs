// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use warden_core::{Priority, Task, TaskType, Value};

fn sample_task() -> Task {
    Task::new(TaskType::ToolInvocation, Priority::Medium, "t", "d", Value::Null, 0)
}

#[test]
fn replay_returns_records_in_append_order() {
    let dir = tempfile::tempdir().unwrap();
    let wal = Wal::open(dir.path().join("wal.jsonl")).unwrap();
    let t1 = sample_task();
    let t2 = sample_task();
    wal.append(&WalRecord::TaskUpserted(Box::new(t1.clone()))).unwrap();
    wal.append(&WalRecord::TaskUpserted(Box::new(t2.clone()))).unwrap();

    let records = wal.replay().unwrap();
    assert_eq!(records.len(), 2);
    match &records[0] {
        WalRecord::TaskUpserted(t) => assert_eq!(t.id, t1.id),
        _ => panic!("wrong variant"),
    }
    match &records[1] {
        WalRecord::TaskUpserted(t) => assert_eq!(t.id, t2.id),
        _ => panic!("wrong variant"),
    }
}

#[test]
fn truncate_empties_the_log() {
    let dir = tempfile::tempdir().unwrap();
    let wal = Wal::open(dir.path().join("wal.jsonl")).unwrap();
    wal.append(&WalRecord::TaskUpserted(Box::new(sample_task()))).unwrap();
    wal.truncate().unwrap();
    assert!(wal.replay().unwrap().is_empty());
}

#[test]
fn reopening_an_existing_wal_preserves_its_contents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wal.jsonl");
    {
        let wal = Wal::open(&path).unwrap();
        wal.append(&WalRecord::TaskUpserted(Box::new(sample_task()))).unwrap();
    }
    let wal = Wal::open(&path).unwrap();
    assert_eq!(wal.replay().unwrap().len(), 1);
}
