// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use warden_core::{Priority, TaskType, Value};

#[test]
fn missing_snapshot_file_returns_none() {
    let dir = tempfile::tempdir().unwrap();
    assert!(Snapshot::read_from(dir.path().join("none.snap")).unwrap().is_none());
}

#[test]
fn round_trips_through_zstd() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.snap");
    let mut snapshot = Snapshot::default();
    snapshot.tasks.push(Task::new(TaskType::System, Priority::Low, "t", "d", Value::Null, 0));

    snapshot.write_to(&path).unwrap();
    let restored = Snapshot::read_from(&path).unwrap().unwrap();
    assert_eq!(restored.tasks.len(), 1);
    assert_eq!(restored.tasks[0].id, snapshot.tasks[0].id);
}
