// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use warden_core::{Priority, TaskType};

fn submission() -> TaskSubmission {
    TaskSubmission {
        kind: TaskType::MessagingInbound,
        priority: Priority::Medium,
        title: "route an inbound message".to_string(),
        description: String::new(),
        payload: Value::Null,
    }
}

#[test]
fn task_submit_round_trips_through_json() {
    let event = InboundEvent::TaskSubmit { task: submission() };
    let json = serde_json::to_string(&event).unwrap();
    assert!(json.contains("\"type\":\"task:submit\""));
    let back: InboundEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(back, event);
}

#[test]
fn gateway_command_subchannels_use_documented_names() {
    let cases: Vec<(GatewayCommand, &str)> = vec![
        (GatewayCommand::TaskCreate { task: submission() }, "task:create"),
        (GatewayCommand::JobList, "job:list"),
        (GatewayCommand::JobToggle { job_id: warden_core::ScheduledJobId::new(), enabled: true }, "job:toggle"),
        (GatewayCommand::SelfEvalRun, "self-eval:run"),
        (GatewayCommand::MemoryStats, "memory:stats"),
        (GatewayCommand::DaemonStatus, "daemon:status"),
    ];
    for (command, subchannel) in cases {
        let json = serde_json::to_string(&command).unwrap();
        assert!(json.contains(&format!("\"subchannel\":\"{subchannel}\"")), "{json}");
    }
}

#[test]
fn state_request_round_trips() {
    let event = InboundEvent::StateRequest { query: StateQuery::DaemonStatus };
    let json = serde_json::to_string(&event).unwrap();
    let back: InboundEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(back, event);
}
