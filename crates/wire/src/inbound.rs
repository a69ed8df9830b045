// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Inbound gateway event shapes (spec §6): `task:submit`, `state:request`,
//! and `gateway:command` with its six documented subchannels. Every
//! non-health call on the real transport carries an opaque bearer secret;
//! that requirement is enforced by the gateway adapter, not these DTOs —
//! the core's contract is just the message shape.

use serde::{Deserialize, Serialize};
use warden_core::{Priority, ScheduledJobId, TaskType, Value};

/// Enough to construct a `Task` without exposing `warden_core::Task`'s
/// lifecycle fields (id, timestamps, result) to the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskSubmission {
    #[serde(rename = "type")]
    pub kind: TaskType,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub payload: Value,
}

/// `state:request`: a read-only query answered synchronously from a state
/// snapshot (spec §9 "callback-style state queries ... replace with a
/// request/reply abstraction").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "query")]
pub enum StateQuery {
    DaemonStatus,
    JobList,
    MemoryStats,
}

/// `gateway:command`'s six documented subchannels (spec §6).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "subchannel")]
pub enum GatewayCommand {
    #[serde(rename = "task:create")]
    TaskCreate { task: TaskSubmission },
    #[serde(rename = "job:list")]
    JobList,
    #[serde(rename = "job:toggle")]
    JobToggle { job_id: ScheduledJobId, enabled: bool },
    #[serde(rename = "self-eval:run")]
    SelfEvalRun,
    #[serde(rename = "memory:stats")]
    MemoryStats,
    #[serde(rename = "daemon:status")]
    DaemonStatus,
}

/// The three inbound event kinds the gateway collaborator may send
/// (spec §6).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum InboundEvent {
    #[serde(rename = "task:submit")]
    TaskSubmit { task: TaskSubmission },
    #[serde(rename = "state:request")]
    StateRequest { query: StateQuery },
    #[serde(rename = "gateway:command")]
    GatewayCommand { command: GatewayCommand },
}

#[cfg(test)]
#[path = "inbound_tests.rs"]
mod tests;
