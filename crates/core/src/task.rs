// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task entity and lifecycle (spec §3, §4.8).

use std::collections::BTreeSet;

use crate::role::AgentRole;
use crate::value::Value;

crate::define_id! {
    /// Opaque task identifier.
    pub struct TaskId("task");
}

/// Closed enum of routable task kinds. Unknown kinds arriving from the
/// gateway are rejected before a `Task` is ever constructed (see
/// `warden-wire`); the orchestrator's routing table is total over this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    MessagingInbound,
    ToolInvocation,
    SelfEvaluation,
    MemoryConsolidation,
    HealthCheck,
    BreakerEvaluation,
    DependencyAudit,
    Introspection,
    System,
}

impl TaskType {
    /// Whether this kind is handled directly by the orchestrator rather than
    /// routed to a sub-handler role (spec §4.8 "direct path").
    pub fn is_system(self) -> bool {
        matches!(
            self,
            TaskType::SelfEvaluation
                | TaskType::MemoryConsolidation
                | TaskType::HealthCheck
                | TaskType::BreakerEvaluation
                | TaskType::DependencyAudit
                | TaskType::Introspection
                | TaskType::System
        )
    }
}

crate::simple_display! {
    TaskType {
        MessagingInbound => "messaging_inbound",
        ToolInvocation => "tool_invocation",
        SelfEvaluation => "self_evaluation",
        MemoryConsolidation => "memory_consolidation",
        HealthCheck => "health_check",
        BreakerEvaluation => "breaker_evaluation",
        DependencyAudit => "dependency_audit",
        Introspection => "introspection",
        System => "system",
    }
}

/// Priority tier. Ordering is derived so that `Critical < High < Medium <
/// Low`, matching pop order in a min-heap scheduler (spec §4.9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

crate::simple_display! {
    Priority {
        Critical => "critical",
        High => "high",
        Medium => "medium",
        Low => "low",
    }
}

/// Result of executing a task (spec §3 `TaskResult`).
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct TaskResult {
    pub success: bool,
    pub output: Option<Value>,
    pub tokens_used: u64,
    pub execution_time_ms: u64,
    pub sub_tasks_spawned: Vec<TaskId>,
    pub errors: Vec<String>,
}

impl TaskResult {
    pub fn ok(output: Value, execution_time_ms: u64) -> Self {
        Self { success: true, output: Some(output), execution_time_ms, ..Default::default() }
    }

    pub fn failed(error: impl Into<String>, execution_time_ms: u64) -> Self {
        Self { success: false, errors: vec![error.into()], execution_time_ms, ..Default::default() }
    }

    /// The distinguished "pending authorization" outcome (spec §7). Not a
    /// retry, not an error — a modeled terminal result.
    pub fn pending_authorization(reason: impl Into<String>, execution_time_ms: u64) -> Self {
        Self {
            success: false,
            errors: vec![format!("pending authorization: {}", reason.into())],
            execution_time_ms,
            ..Default::default()
        }
    }

    /// True when this result carries the pending-authorization marker.
    pub fn is_pending_authorization(&self) -> bool {
        !self.success && self.errors.iter().any(|e| e.starts_with("pending authorization: "))
    }
}

/// A unit of work (spec §3 `Task`). Owned exclusively by the orchestrator.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Task {
    pub id: TaskId,
    #[serde(rename = "type")]
    pub kind: TaskType,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    pub payload: Value,
    pub assigned_role: Option<AgentRole>,
    pub dependencies: BTreeSet<TaskId>,
    pub created_at_ms: u64,
    pub started_at_ms: Option<u64>,
    pub completed_at_ms: Option<u64>,
    pub result: Option<TaskResult>,
}

impl Task {
    pub fn new(
        kind: TaskType,
        priority: Priority,
        title: impl Into<String>,
        description: impl Into<String>,
        payload: Value,
        created_at_ms: u64,
    ) -> Self {
        Self {
            id: TaskId::new(),
            kind,
            priority,
            title: title.into(),
            description: description.into(),
            payload,
            assigned_role: None,
            dependencies: BTreeSet::new(),
            created_at_ms,
            started_at_ms: None,
            completed_at_ms: None,
            result: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.completed_at_ms.is_some()
    }

    /// A task has no unfinished dependency with respect to the given set of
    /// already-completed task ids (spec §3: "popped ... when no unfinished
    /// dependency").
    pub fn is_ready(&self, completed: &std::collections::HashSet<TaskId>) -> bool {
        self.dependencies.iter().all(|dep| completed.contains(dep))
    }

    /// A crash-abandoned task: started but never completed (spec §4.8).
    pub fn is_abandoned(&self) -> bool {
        self.started_at_ms.is_some() && self.completed_at_ms.is_none()
    }
}

#[cfg(any(test, feature = "test-support"))]
crate::builder! {
    pub struct TaskBuilder => Task {
        computed { id: TaskId = TaskId::new() }
        set { kind: TaskType = TaskType::System }
        set { priority: Priority = Priority::Medium }
        into { title: String = "test task" }
        into { description: String = "" }
        set { payload: Value = Value::Null }
        set { assigned_role: Option<AgentRole> = None }
        set { dependencies: BTreeSet<TaskId> = BTreeSet::new() }
        set { created_at_ms: u64 = 0 }
        set { started_at_ms: Option<u64> = None }
        set { completed_at_ms: Option<u64> = None }
        set { result: Option<TaskResult> = None }
    }
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
