// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scheduled (recurring) job definition (spec §3, §4.9).

use crate::task::{Priority, TaskType};
use crate::value::Value;

crate::define_id! {
    /// Opaque scheduled job identifier.
    pub struct ScheduledJobId("sjob");
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ScheduledJob {
    pub id: ScheduledJobId,
    pub name: String,
    pub task_type: TaskType,
    pub priority: Priority,
    pub interval_ms: u64,
    pub last_run_ms: Option<u64>,
    pub next_run_ms: u64,
    pub enabled: bool,
    pub payload: Value,
}

impl ScheduledJob {
    pub fn new(
        name: impl Into<String>,
        task_type: TaskType,
        priority: Priority,
        interval_ms: u64,
        starts_at_ms: u64,
    ) -> Self {
        Self {
            id: ScheduledJobId::new(),
            name: name.into(),
            task_type,
            priority,
            interval_ms,
            last_run_ms: None,
            next_run_ms: starts_at_ms + interval_ms,
            enabled: true,
            payload: Value::Null,
        }
    }

    pub fn is_due(&self, now_ms: u64) -> bool {
        self.enabled && now_ms >= self.next_run_ms
    }

    /// Advance `next_run_ms` from `now_ms`, not from the previous
    /// `next_run_ms`, so a long stall doesn't cause a burst of catch-up
    /// fires (spec §4.9 "cannot overlap with themselves").
    pub fn record_run(&mut self, now_ms: u64) {
        self.last_run_ms = Some(now_ms);
        self.next_run_ms = now_ms + self.interval_ms;
    }
}

/// Names and intervals of the default scheduled jobs (spec §4.9).
pub const DEFAULT_JOBS: &[(&str, TaskType, u64)] = &[
    ("self-evaluation", TaskType::SelfEvaluation, 24 * 60 * 60 * 1000),
    ("incremental-sync", TaskType::MessagingInbound, 60 * 60 * 1000),
    ("memory-consolidation", TaskType::MemoryConsolidation, 6 * 60 * 60 * 1000),
    ("health-check", TaskType::HealthCheck, 30 * 1000),
    ("breaker-evaluation", TaskType::BreakerEvaluation, 60 * 1000),
    ("dependency-audit", TaskType::DependencyAudit, 6 * 60 * 60 * 1000),
    ("introspection", TaskType::Introspection, 60 * 60 * 1000),
];

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
