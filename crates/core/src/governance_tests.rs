// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn default_mapping_is_strictest_first() {
    assert_eq!(GovernancePolicy::default_for(RiskLevel::Critical).authority, Authority::RequireHuman);
    assert_eq!(GovernancePolicy::default_for(RiskLevel::High).authority, Authority::RequireApproval);
    assert_eq!(GovernancePolicy::default_for(RiskLevel::Medium).authority, Authority::LogOnly);
    assert_eq!(GovernancePolicy::default_for(RiskLevel::Low).authority, Authority::AutoApprove);
}

#[test]
fn escalation_saturates_at_require_human() {
    assert_eq!(Authority::RequireApproval.escalate_one_step(), Authority::RequireHuman);
    assert_eq!(Authority::RequireHuman.escalate_one_step(), Authority::RequireHuman);
    assert_eq!(Authority::AutoApprove.escalate_one_step(), Authority::RequireApproval);
}

#[test]
fn auto_execute_allowed_only_for_auto_approve_and_log_only() {
    assert!(Authority::AutoApprove.allows_auto_execute());
    assert!(Authority::LogOnly.allows_auto_execute());
    assert!(!Authority::RequireApproval.allows_auto_execute());
    assert!(!Authority::RequireHuman.allows_auto_execute());
}
