// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use warden_core::{BreakerConfig, FakeClock, Priority, Task, TaskType, Value};
use warden_engine::CircuitBreakerRegistry;
use warden_storage::InMemoryStore;

use super::*;
use crate::supervisor::LoggingRecoveryHooks;

fn task(kind: TaskType) -> Task {
    Task::new(kind, Priority::Low, "test", "", Value::Null, 0)
}

fn runner(dir: &std::path::Path, urls: Vec<String>) -> DaemonSystemTaskRunner<FakeClock> {
    let clock = FakeClock::new();
    let store: Arc<dyn Store> = Arc::new(InMemoryStore::open(dir).unwrap());
    let breakers = Arc::new(CircuitBreakerRegistry::new(
        clock.clone(),
        BreakerConfig { failure_threshold: 5, cooldown_ms: 30_000 },
    ));
    let supervisor =
        Arc::new(SelfHealingSupervisor::new(clock.clone(), breakers, Arc::new(LoggingRecoveryHooks)));
    let (events, _subscriber) = EventEmitter::new();
    DaemonSystemTaskRunner::new(clock, store, supervisor, events, urls)
}

#[tokio::test]
async fn health_check_succeeds_when_every_probe_is_healthy() {
    let dir = tempfile::tempdir().unwrap();
    let runner = runner(dir.path(), Vec::new());
    let result = runner.health_check(&task(TaskType::System)).await;
    assert!(result.success);
}

#[tokio::test]
async fn breaker_evaluation_succeeds_with_no_breakers_to_promote() {
    let dir = tempfile::tempdir().unwrap();
    let runner = runner(dir.path(), Vec::new());
    let result = runner.breaker_evaluation(&task(TaskType::System)).await;
    assert!(result.success);
}

#[tokio::test]
async fn dependency_audit_is_a_no_op_success_with_no_urls_configured() {
    let dir = tempfile::tempdir().unwrap();
    let runner = runner(dir.path(), Vec::new());
    let result = runner.dependency_audit(&task(TaskType::System)).await;
    assert!(result.success);
    assert_eq!(result.output, Some(Value::Null));
}
