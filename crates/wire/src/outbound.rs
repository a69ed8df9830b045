// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Synchronous replies to `gateway:command` and `state:request` (spec §6).
//! The asynchronous broadcast taxonomy (`task:created`, `daemon:heartbeat`,
//! ...) is `warden_core::Event` itself — re-exported as `OutboundEvent` from
//! this crate's root — since its wire tags already match spec §6.

use serde::{Deserialize, Serialize};
use warden_core::{ScheduledJob, TaskId};

/// A trimmed view of a `ScheduledJob` safe to hand to the gateway (spec §6
/// `job:list`): no payload, since jobs may carry sensitive invocation data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduledJobSummary {
    pub id: String,
    pub name: String,
    pub enabled: bool,
    pub interval_ms: u64,
    pub next_run_ms: u64,
}

impl From<&ScheduledJob> for ScheduledJobSummary {
    fn from(job: &ScheduledJob) -> Self {
        Self {
            id: job.id.to_string(),
            name: job.name.clone(),
            enabled: job.enabled,
            interval_ms: job.interval_ms,
            next_run_ms: job.next_run_ms,
        }
    }
}

/// Reply to a `gateway:command` or `state:request` (spec §6). Distinct from
/// `warden_core::Event`: these are request/reply, not broadcast.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum GatewayResponse {
    Ok,
    Error { message: String },
    TaskAccepted { task_id: TaskId },
    DaemonStatus { uptime_ms: u64, queue_depth: usize, heartbeat_tick: u64 },
    Jobs { jobs: Vec<ScheduledJobSummary> },
    MemoryStats { count: usize },
}

#[cfg(test)]
#[path = "outbound_tests.rs"]
mod tests;
