// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persisted-table row types beyond the core entities (spec §6 "Persisted
//! state layout"): `execution_log`, `self_evaluations`, `memories`.

use warden_core::{AgentRole, TaskId, Value};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ExecutionLogRecord {
    pub task_id: TaskId,
    pub role: Option<AgentRole>,
    pub success: bool,
    pub execution_time_ms: u64,
    pub timestamp_ms: u64,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SelfEvaluationRecord {
    pub id: uuid::Uuid,
    pub summary: String,
    pub timestamp_ms: u64,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct MemoryRecord {
    pub namespace: String,
    pub key: String,
    pub value: Value,
    pub timestamp_ms: u64,
}
