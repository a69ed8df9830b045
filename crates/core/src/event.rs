// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cross-component event taxonomy (spec §4.11, §6). Subscribers receive
//! events in emission order within a single emitter; cross-emitter ordering
//! is not guaranteed (spec §5).

use crate::audit::AuditEntry;
use crate::breaker::BreakerState;
use crate::bus::BusMessage;
use crate::health::HealthResult;
use crate::task::{Task, TaskId, TaskResult};
use crate::value::Value;

/// Every event kind the core emits, tagged by `type` for the gateway
/// (spec §6 outbound taxonomy: `task:*`, `agent:*`, `tool:*`, `daemon:*`,
/// `healing:*`, `memory:*`, `bus:*`).
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    #[serde(rename = "task:created")]
    TaskCreated { task_id: TaskId },
    #[serde(rename = "task:started")]
    TaskStarted { task_id: TaskId },
    #[serde(rename = "task:completed")]
    TaskCompleted { task_id: TaskId, result: TaskResult },
    #[serde(rename = "task:failed")]
    TaskFailed { task_id: TaskId, result: TaskResult },

    #[serde(rename = "agent:spawned")]
    AgentSpawned { role: String },
    #[serde(rename = "agent:terminated")]
    AgentTerminated { role: String },
    #[serde(rename = "agent:error")]
    AgentError { role: String, message: String },

    #[serde(rename = "tool:invoked")]
    ToolInvoked { tool_name: String, actor: String },
    #[serde(rename = "tool:result")]
    ToolResult { tool_name: String, success: bool },

    #[serde(rename = "daemon:started")]
    DaemonStarted,
    #[serde(rename = "daemon:heartbeat")]
    DaemonHeartbeat { tick: u64 },
    #[serde(rename = "daemon:stopped")]
    DaemonStopped,

    #[serde(rename = "healing:health_check")]
    HealingHealthCheck { results: Vec<HealthResult> },
    #[serde(rename = "healing:circuit_break")]
    HealingCircuitBreak { operation_name: String, state: BreakerState },
    #[serde(rename = "healing:recovery")]
    HealingRecovery { component: String },

    #[serde(rename = "memory:stored")]
    MemoryStored { key: String },
    #[serde(rename = "memory:recalled")]
    MemoryRecalled { key: String },

    #[serde(rename = "bus:message")]
    BusMessage { message: BusMessage },
    #[serde(rename = "bus:broadcast")]
    BusBroadcast { message: BusMessage },
    #[serde(rename = "bus:expired")]
    BusExpired { message_id: crate::bus::BusMessageId },

    #[serde(rename = "audit:appended")]
    AuditAppended { entry: AuditEntry },
}

impl Event {
    pub fn task_created(task: &Task) -> Self {
        Event::TaskCreated { task_id: task.id }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
