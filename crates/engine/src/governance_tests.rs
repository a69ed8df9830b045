// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use warden_core::{FakeClock, InputSchema, RiskLevel};

fn tool(name: &'static str, risk_level: RiskLevel, requires_approval: bool) -> ToolDescriptor {
    ToolDescriptor {
        name,
        description: "test tool",
        category: "test",
        input_schema: InputSchema::default(),
        requires_approval,
        risk_level,
    }
}

fn engine() -> GovernanceEngine<FakeClock> {
    GovernanceEngine::new(FakeClock::new())
}

#[test]
fn default_mapping_is_strictest_first() {
    let engine = engine();
    assert_eq!(engine.decide(&tool("t", RiskLevel::Critical, false), None), Authority::RequireHuman);
    assert_eq!(engine.decide(&tool("t", RiskLevel::High, false), None), Authority::RequireApproval);
    assert_eq!(engine.decide(&tool("t", RiskLevel::Medium, false), None), Authority::LogOnly);
    assert_eq!(engine.decide(&tool("t", RiskLevel::Low, false), None), Authority::AutoApprove);
}

#[test]
fn requires_approval_at_critical_always_requires_human() {
    let engine = engine();
    let authority = engine.decide(&tool("t", RiskLevel::Critical, true), None);
    assert_eq!(authority, Authority::RequireHuman);
}

#[test]
fn requires_approval_floors_low_risk_tool_at_require_approval() {
    let engine = engine();
    let authority = engine.decide(&tool("t", RiskLevel::Low, true), None);
    assert_eq!(authority, Authority::RequireApproval);
}

#[test]
fn value_threshold_escalation_scenario_from_spec() {
    let engine = engine();
    let mut policy = GovernancePolicy::default_for(RiskLevel::High);
    policy.max_auto_approve_value = Some(1000.0);
    engine.set_policy(policy);

    let authority = engine.decide(&tool("wire_transfer", RiskLevel::High, false), Some(1500.0));
    assert_eq!(authority, Authority::RequireHuman);

    let log = engine.decision_log();
    assert_eq!(log.len(), 1);
    assert!(log[0].reason.contains("Value threshold exceeded"));
}

#[test]
fn can_auto_execute_is_true_only_for_auto_approve_and_log_only() {
    let engine = engine();
    assert!(engine.can_auto_execute(&tool("t", RiskLevel::Low, false), None));
    assert!(engine.can_auto_execute(&tool("t", RiskLevel::Medium, false), None));
    assert!(!engine.can_auto_execute(&tool("t", RiskLevel::High, false), None));
    assert!(!engine.can_auto_execute(&tool("t", RiskLevel::Critical, false), None));
}

#[test]
fn decision_log_halves_on_overflow() {
    let engine = engine();
    for _ in 0..(DECISION_LOG_CAP + 1) {
        engine.decide(&tool("t", RiskLevel::Low, false), None);
    }
    assert!(engine.decision_log().len() <= DECISION_LOG_CAP);
}
