// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded-autonomy governance engine (C3, spec §4.3). Maps a tool's risk
//! level, its own `requiresApproval` flag, and an optional estimated value
//! to an [`Authority`], and records every decision in a bounded log.

use std::collections::HashMap;

use parking_lot::Mutex;
use warden_core::{
    Authority, Clock, GovernanceDecision, GovernancePolicy, RiskLevel, ToolDescriptor,
    DECISION_LOG_CAP,
};

/// Per-risk-level policy table plus the bounded decision log (spec §4.3).
pub struct GovernanceEngine<C: Clock> {
    clock: C,
    policies: Mutex<HashMap<RiskLevel, GovernancePolicy>>,
    decisions: Mutex<Vec<GovernanceDecision>>,
}

impl<C: Clock> GovernanceEngine<C> {
    /// Boots with the default strictest-first mapping for every risk level
    /// (spec §4.3); callers override individual levels via [`Self::set_policy`].
    pub fn new(clock: C) -> Self {
        let mut policies = HashMap::new();
        for risk_level in [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High, RiskLevel::Critical] {
            policies.insert(risk_level, GovernancePolicy::default_for(risk_level));
        }
        Self { clock, policies: Mutex::new(policies), decisions: Mutex::new(Vec::new()) }
    }

    pub fn set_policy(&self, policy: GovernancePolicy) {
        self.policies.lock().insert(policy.risk_level, policy);
    }

    pub fn policy_for(&self, risk_level: RiskLevel) -> GovernancePolicy {
        self.policies
            .lock()
            .get(&risk_level)
            .copied()
            .unwrap_or_else(|| GovernancePolicy::default_for(risk_level))
    }

    /// Decides the authority for a proposed invocation and records the
    /// decision (spec §4.3). `estimated_value` drives the value-threshold
    /// escalation rule when the policy declares `maxAutoApproveValue`.
    pub fn decide(&self, tool: &ToolDescriptor, estimated_value: Option<f64>) -> Authority {
        let policy = self.policy_for(tool.risk_level);
        let mut authority = policy.authority;
        let mut reason = format!("default policy for risk level {}", tool.risk_level);

        if tool.requires_approval && authority < Authority::RequireApproval {
            authority = Authority::RequireApproval;
            reason = "tool declares requiresApproval".to_string();
        }
        if tool.requires_approval && tool.risk_level == RiskLevel::Critical {
            authority = Authority::RequireHuman;
            reason = "tool declares requiresApproval at critical risk".to_string();
        }

        if let (Some(max), Some(value)) = (policy.max_auto_approve_value, estimated_value) {
            if value > max {
                authority = authority.escalate_one_step();
                reason = format!("Value threshold exceeded: {value} > {max}");
            }
        }

        self.record(tool.name, tool.risk_level, authority, reason);
        authority
    }

    pub fn can_auto_execute(&self, tool: &ToolDescriptor, estimated_value: Option<f64>) -> bool {
        self.decide(tool, estimated_value).allows_auto_execute()
    }

    fn record(&self, tool_name: &str, risk_level: RiskLevel, authority: Authority, reason: String) {
        let mut decisions = self.decisions.lock();
        decisions.push(GovernanceDecision {
            tool_name: tool_name.to_string(),
            risk_level,
            authority,
            reason,
            timestamp_ms: self.clock.epoch_ms(),
        });
        if decisions.len() > DECISION_LOG_CAP {
            let keep_from = decisions.len() / 2;
            decisions.drain(..keep_from);
        }
    }

    pub fn decision_log(&self) -> Vec<GovernanceDecision> {
        self.decisions.lock().clone()
    }
}

#[cfg(test)]
#[path = "governance_tests.rs"]
mod tests;
