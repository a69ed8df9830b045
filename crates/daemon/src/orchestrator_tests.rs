// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use warden_core::{AgentRole, FakeClock, Priority, Task, TaskType, Value};
use warden_storage::{InMemoryStore, Store};

use super::*;

struct EchoHandler;

#[async_trait::async_trait]
impl TaskHandler for EchoHandler {
    async fn handle(&self, task: &Task, ctx: &HandlerContext) -> TaskResult {
        assert_eq!(ctx.role, AgentRole::Messaging);
        TaskResult::ok(task.payload.clone(), 0)
    }
}

struct FailingHandler;

#[async_trait::async_trait]
impl TaskHandler for FailingHandler {
    async fn handle(&self, _task: &Task, _ctx: &HandlerContext) -> TaskResult {
        TaskResult::failed("handler blew up", 0)
    }
}

fn orchestrator() -> (Orchestrator<FakeClock>, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn Store> = Arc::new(InMemoryStore::open(dir.path()).unwrap());
    let (events, _sub) = EventEmitter::new();
    let runner = Arc::new(NoopSystemTaskRunner) as Arc<dyn SystemTaskRunner>;
    (Orchestrator::new(FakeClock::new(), store, events, runner), dir)
}

#[tokio::test]
async fn messaging_inbound_routes_to_the_messaging_role() {
    let (mut orchestrator, _dir) = orchestrator();
    orchestrator.register_handler(AgentRole::Messaging, Arc::new(EchoHandler));

    let task = orchestrator
        .create_task(TaskType::MessagingInbound, Priority::Medium, "route", "", Value::Bool(true))
        .unwrap();
    let result = orchestrator.execute_task(task).await;
    assert!(result.success);
    assert_eq!(result.output, Some(Value::Bool(true)));
}

#[tokio::test]
async fn an_explicit_assigned_role_overrides_the_default_route() {
    let (mut orchestrator, _dir) = orchestrator();
    orchestrator.register_handler(AgentRole::Messaging, Arc::new(EchoHandler));

    let task = Task::builder()
        .kind(TaskType::System)
        .priority(Priority::Low)
        .payload(Value::Bool(false))
        .assigned_role(Some(AgentRole::Messaging))
        .build();
    assert_eq!(orchestrator.route_task(&task), AgentRole::Messaging);
    let result = orchestrator.execute_task(task).await;
    assert!(result.success);
}

#[tokio::test]
async fn system_task_kinds_take_the_direct_path_with_no_handler_registered() {
    let (orchestrator, _dir) = orchestrator();
    let task = orchestrator
        .create_task(TaskType::HealthCheck, Priority::Low, "probe", "", Value::Null)
        .unwrap();
    let result = orchestrator.execute_task(task).await;
    assert!(result.success);
}

#[tokio::test]
async fn a_tool_invocation_with_no_assigned_role_fails_instead_of_panicking() {
    let (orchestrator, _dir) = orchestrator();
    let task = orchestrator
        .create_task(TaskType::ToolInvocation, Priority::Medium, "invoke", "", Value::Null)
        .unwrap();
    let result = orchestrator.execute_task(task).await;
    assert!(!result.success);
}

#[tokio::test]
async fn a_handler_failure_becomes_a_failing_result_not_a_panic() {
    let (mut orchestrator, _dir) = orchestrator();
    orchestrator.register_handler(AgentRole::Messaging, Arc::new(FailingHandler));
    let task = orchestrator
        .create_task(TaskType::MessagingInbound, Priority::High, "x", "", Value::Null)
        .unwrap();
    let result = orchestrator.execute_task(task).await;
    assert!(!result.success);
    assert_eq!(result.errors, vec!["handler blew up".to_string()]);
}

#[tokio::test]
async fn execute_task_persists_start_and_completion_timestamps() {
    let (orchestrator, _dir) = orchestrator();
    let task = orchestrator
        .create_task(TaskType::Introspection, Priority::Low, "look inward", "", Value::Null)
        .unwrap();
    let task_id = task.id;
    orchestrator.execute_task(task).await;

    let stored = orchestrator.task(task_id).unwrap();
    assert!(stored.started_at_ms.is_some());
    assert!(stored.completed_at_ms.is_some());
    assert!(stored.result.is_some());
}

#[test]
fn abandoned_tasks_are_those_started_but_never_completed() {
    let (orchestrator, _dir) = orchestrator();
    let abandoned = Task::builder().kind(TaskType::System).started_at_ms(Some(1)).build();
    let finished =
        Task::builder().kind(TaskType::System).started_at_ms(Some(1)).completed_at_ms(Some(2)).build();

    orchestrator.store.upsert_task(abandoned.clone()).unwrap();
    orchestrator.store.upsert_task(finished).unwrap();

    let found = orchestrator.abandoned_tasks();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, abandoned.id);
}
