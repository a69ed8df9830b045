// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task orchestrator (C8, spec §4.8). Routes tasks to role handlers,
//! drives execution end to end, and emits the `task:*` lifecycle events.
//! Task storage lives in the shared [`Store`]; the orchestrator never
//! keeps a second copy of the task map (spec §4.12 "each subsystem owns
//! its own in-memory view").

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, instrument};
use warden_core::{AgentRole, Clock, Event, Priority, Task, TaskId, TaskResult, TaskType, Value};
use warden_storage::{ExecutionLogRecord, Store, StorageError};

use crate::event_bus::EventEmitter;

/// The capability interface every role handler implements (spec §9
/// "Handler polymorphism": a total routing function plus one method per
/// handler, not a class hierarchy).
#[async_trait]
pub trait TaskHandler: Send + Sync {
    async fn handle(&self, task: &Task, ctx: &HandlerContext) -> TaskResult;
}

/// Execution context a handler receives: the role it is acting as, the
/// tool names that role may invoke, and a deadline — not a god-object
/// (spec §4.8, §9).
#[derive(Debug, Clone)]
pub struct HandlerContext {
    pub role: AgentRole,
    pub allowed_tools: &'static [&'static str],
    pub deadline_ms: u64,
}

/// The orchestrator's own direct-execution path for "system" task kinds
/// (spec §4.8 "direct path"). One method per system [`TaskType`]; the
/// default is a documented no-op so a daemon that hasn't wired a real
/// collaborator for a given system task still boots and runs.
#[async_trait]
pub trait SystemTaskRunner: Send + Sync {
    async fn self_evaluation(&self, _task: &Task) -> TaskResult {
        TaskResult::ok(Value::Null, 0)
    }
    async fn memory_consolidation(&self, _task: &Task) -> TaskResult {
        TaskResult::ok(Value::Null, 0)
    }
    async fn health_check(&self, _task: &Task) -> TaskResult {
        TaskResult::ok(Value::Null, 0)
    }
    async fn breaker_evaluation(&self, _task: &Task) -> TaskResult {
        TaskResult::ok(Value::Null, 0)
    }
    async fn dependency_audit(&self, _task: &Task) -> TaskResult {
        TaskResult::ok(Value::Null, 0)
    }
    async fn introspection(&self, _task: &Task) -> TaskResult {
        TaskResult::ok(Value::Null, 0)
    }
}

/// Every system task is a no-op until a real collaborator is wired in.
#[derive(Debug, Default)]
pub struct NoopSystemTaskRunner;
impl SystemTaskRunner for NoopSystemTaskRunner {}

/// Default handler for the messaging role: no concrete messaging
/// collaborator is wired in, so it logs receipt and succeeds trivially
/// rather than leaving every `incremental-sync` fire and every gateway
/// `MessagingInbound` submission with no registered handler.
#[derive(Debug, Default)]
pub struct NoopMessagingHandler;

#[async_trait]
impl TaskHandler for NoopMessagingHandler {
    async fn handle(&self, task: &Task, _ctx: &HandlerContext) -> TaskResult {
        info!(task_id = %task.id, "messaging task received with no concrete collaborator wired");
        TaskResult::ok(Value::Null, 0)
    }
}

pub struct Orchestrator<C: Clock> {
    clock: C,
    store: Arc<dyn Store>,
    events: EventEmitter,
    handlers: HashMap<AgentRole, Arc<dyn TaskHandler>>,
    system_runner: Arc<dyn SystemTaskRunner>,
}

impl<C: Clock> Orchestrator<C> {
    pub fn new(
        clock: C,
        store: Arc<dyn Store>,
        events: EventEmitter,
        system_runner: Arc<dyn SystemTaskRunner>,
    ) -> Self {
        Self { clock, store, events, handlers: HashMap::new(), system_runner }
    }

    /// Registers the handler for a role. Re-registering a role replaces
    /// its handler; there is exactly one handler per role at a time.
    pub fn register_handler(&mut self, role: AgentRole, handler: Arc<dyn TaskHandler>) {
        self.handlers.insert(role, handler);
    }

    /// Creates a task in pending state and persists it (spec §4.8
    /// `createTask`).
    pub fn create_task(
        &self,
        kind: TaskType,
        priority: Priority,
        title: impl Into<String>,
        description: impl Into<String>,
        payload: Value,
    ) -> Result<Task, StorageError> {
        let task = Task::new(kind, priority, title, description, payload, self.clock.epoch_ms());
        self.store.upsert_task(task.clone())?;
        self.events.emit(Event::task_created(&task));
        Ok(task)
    }

    /// Deterministic, total lookup (spec §4.8 `routeTask`): an explicit
    /// `assigned_role` always wins; otherwise `messaging_inbound` routes
    /// to the messaging role and every other kind takes the
    /// orchestrator's own direct path.
    pub fn route_task(&self, task: &Task) -> AgentRole {
        if let Some(role) = task.assigned_role {
            return role;
        }
        match task.kind {
            TaskType::MessagingInbound => AgentRole::Messaging,
            _ => AgentRole::Orchestrator,
        }
    }

    /// Drives one task end to end (spec §4.8 `executeTask`): start, route,
    /// dispatch, complete. A handler's own errors never escape — they
    /// become a failing [`TaskResult`] instead (spec §4.8, §7).
    #[instrument(skip(self, task), fields(task_id = %task.id, kind = %task.kind))]
    pub async fn execute_task(&self, mut task: Task) -> TaskResult {
        let start = self.clock.now();
        task.started_at_ms = Some(self.clock.epoch_ms());
        if let Err(e) = self.store.upsert_task(task.clone()) {
            error!(error = %e, "failed to persist task start");
        }
        self.events.emit(Event::TaskStarted { task_id: task.id });

        let role = self.route_task(&task);
        let mut result = self.dispatch(role, &task).await;
        result.execution_time_ms = self.clock.now().duration_since(start).as_millis() as u64;

        task.completed_at_ms = Some(self.clock.epoch_ms());
        task.result = Some(result.clone());
        if let Err(e) = self.store.upsert_task(task.clone()) {
            error!(error = %e, "failed to persist task completion");
        }
        if let Err(e) = self.store.log_execution(ExecutionLogRecord {
            task_id: task.id,
            role: Some(role),
            success: result.success,
            execution_time_ms: result.execution_time_ms,
            timestamp_ms: self.clock.epoch_ms(),
        }) {
            error!(error = %e, "failed to append execution log");
        }

        self.events.emit(if result.success {
            Event::TaskCompleted { task_id: task.id, result: result.clone() }
        } else {
            Event::TaskFailed { task_id: task.id, result: result.clone() }
        });
        info!(success = result.success, "task executed");
        result
    }

    async fn dispatch(&self, role: AgentRole, task: &Task) -> TaskResult {
        if role == AgentRole::Orchestrator && task.kind.is_system() {
            return self.dispatch_direct(task).await;
        }
        let Some(handler) = self.handlers.get(&role) else {
            return TaskResult::failed(format!("no handler registered for role {role}"), 0);
        };
        let ctx = HandlerContext {
            role,
            allowed_tools: role.descriptor().allowed_tools,
            deadline_ms: self.clock.epoch_ms() + 30_000,
        };
        handler.handle(task, &ctx).await
    }

    async fn dispatch_direct(&self, task: &Task) -> TaskResult {
        match task.kind {
            TaskType::SelfEvaluation => self.system_runner.self_evaluation(task).await,
            TaskType::MemoryConsolidation => self.system_runner.memory_consolidation(task).await,
            TaskType::HealthCheck => self.system_runner.health_check(task).await,
            TaskType::BreakerEvaluation => self.system_runner.breaker_evaluation(task).await,
            TaskType::DependencyAudit => self.system_runner.dependency_audit(task).await,
            TaskType::Introspection => self.system_runner.introspection(task).await,
            TaskType::System => TaskResult::ok(Value::Null, 0),
            TaskType::MessagingInbound | TaskType::ToolInvocation => {
                TaskResult::failed("task has no assigned role and is not a system kind", 0)
            }
        }
    }

    /// Tasks left `started_at` set but never `completed_at` — abandoned by
    /// a crash (spec §4.8 "tasks are never lost"). The scheduler re-queues
    /// these on boot.
    pub fn abandoned_tasks(&self) -> Vec<Task> {
        self.store.tasks().into_iter().filter(Task::is_abandoned).collect()
    }

    pub fn task(&self, id: TaskId) -> Option<Task> {
        self.store.task(id)
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
