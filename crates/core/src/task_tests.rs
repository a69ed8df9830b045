// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::collections::HashSet;

#[test]
fn priority_orders_critical_first() {
    let mut ps = vec![Priority::Low, Priority::Critical, Priority::Medium, Priority::High];
    ps.sort();
    assert_eq!(ps, vec![Priority::Critical, Priority::High, Priority::Medium, Priority::Low]);
}

#[test]
fn system_task_types_route_direct() {
    assert!(TaskType::HealthCheck.is_system());
    assert!(!TaskType::ToolInvocation.is_system());
}

#[test]
fn ready_when_all_dependencies_completed() {
    let dep = TaskId::new();
    let task = Task::builder().dependencies([dep].into_iter().collect()).build();
    let mut completed = HashSet::new();
    assert!(!task.is_ready(&completed));
    completed.insert(dep);
    assert!(task.is_ready(&completed));
}

#[test]
fn abandoned_when_started_without_completion() {
    let task = Task::builder().started_at_ms(Some(1)).build();
    assert!(task.is_abandoned());
}

#[test]
fn pending_authorization_result_is_recognized() {
    let result = TaskResult::pending_authorization("requires human", 5);
    assert!(result.is_pending_authorization());
    assert!(!result.success);
}
