// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use warden_core::{Priority, TaskType};

#[test]
fn scheduled_job_summary_omits_payload() {
    let job = ScheduledJob::new("self-evaluation", TaskType::SelfEvaluation, Priority::Low, 1_000, 0);
    let summary = ScheduledJobSummary::from(&job);
    assert_eq!(summary.name, "self-evaluation");
    assert!(summary.enabled);
    let json = serde_json::to_string(&summary).unwrap();
    assert!(!json.contains("payload"));
}

#[test]
fn gateway_response_error_round_trips() {
    let response = GatewayResponse::Error { message: "breaker open".to_string() };
    let json = serde_json::to_string(&response).unwrap();
    assert!(json.contains("\"type\":\"Error\""));
    let back: GatewayResponse = serde_json::from_str(&json).unwrap();
    assert_eq!(back, response);
}
