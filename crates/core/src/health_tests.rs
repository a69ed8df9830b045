// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn status_orders_healthy_below_unhealthy() {
    assert!(HealthStatus::Healthy < HealthStatus::Degraded);
    assert!(HealthStatus::Degraded < HealthStatus::Unhealthy);
}

#[test]
fn healthy_constructor_sets_empty_message() {
    let result = HealthResult::healthy("process", 1, 0);
    assert_eq!(result.status, HealthStatus::Healthy);
    assert!(result.message.is_empty());
}
