// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use warden_core::{BreakerConfig, FakeClock};

use super::*;

struct RecordingRecoveryHooks {
    calls: Mutex<Vec<&'static str>>,
}

impl RecordingRecoveryHooks {
    fn new() -> Self {
        Self { calls: Mutex::new(Vec::new()) }
    }

    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().clone()
    }
}

#[async_trait::async_trait]
impl RecoveryHooks for RecordingRecoveryHooks {
    async fn recover_process(&self) {
        self.calls.lock().push("process");
    }
    async fn recover_database(&self) {
        self.calls.lock().push("database");
    }
}

fn unhealthy_report(component: &str) -> Vec<HealthResult> {
    vec![HealthResult {
        component: component.to_string(),
        status: HealthStatus::Unhealthy,
        latency_ms: 999,
        message: "forced unhealthy".to_string(),
        timestamp_ms: 0,
    }]
}

fn healthy_report() -> Vec<HealthResult> {
    vec![HealthResult::healthy("process", 1, 0)]
}

fn supervisor() -> (SelfHealingSupervisor<FakeClock>, Arc<RecordingRecoveryHooks>) {
    let clock = FakeClock::new();
    let breakers = Arc::new(CircuitBreakerRegistry::new(clock.clone(), BreakerConfig::default()));
    let recovery = Arc::new(RecordingRecoveryHooks::new());
    (SelfHealingSupervisor::new(clock, breakers, recovery.clone()), recovery)
}

#[tokio::test]
async fn third_consecutive_unhealthy_report_triggers_recovery_exactly_once() {
    let (supervisor, recovery) = supervisor();

    let events1 = supervisor.record_report(unhealthy_report("database")).await;
    assert!(!events1.iter().any(|e| matches!(e, Event::HealingRecovery { .. })));
    let events2 = supervisor.record_report(unhealthy_report("database")).await;
    assert!(!events2.iter().any(|e| matches!(e, Event::HealingRecovery { .. })));
    assert!(recovery.calls().is_empty());

    let events3 = supervisor.record_report(unhealthy_report("database")).await;
    assert_eq!(recovery.calls(), vec!["database"]);
    let recovery_events: Vec<_> =
        events3.iter().filter(|e| matches!(e, Event::HealingRecovery { .. })).collect();
    assert_eq!(recovery_events.len(), 1);
}

#[tokio::test]
async fn a_healthy_report_resets_the_consecutive_counter() {
    let (supervisor, _recovery) = supervisor();
    supervisor.record_report(unhealthy_report("process")).await;
    supervisor.record_report(unhealthy_report("process")).await;
    supervisor.record_report(healthy_report()).await;
    assert_eq!(supervisor.consecutive_unhealthy(), 0);
}

#[test]
fn dependency_audit_is_due_after_the_interval_elapses() {
    let clock = FakeClock::new();
    let breakers = Arc::new(CircuitBreakerRegistry::new(clock.clone(), BreakerConfig::default()));
    let supervisor = SelfHealingSupervisor::new(clock.clone(), breakers, Arc::new(LoggingRecoveryHooks));
    assert!(!supervisor.dependency_audit_due());
    clock.advance(Duration::from_millis(DEPENDENCY_AUDIT_INTERVAL_MS));
    assert!(supervisor.dependency_audit_due());
}

#[test]
fn evaluate_breakers_emits_circuit_break_events_for_half_open_transitions() {
    let clock = FakeClock::new();
    let breakers = Arc::new(CircuitBreakerRegistry::new(
        clock.clone(),
        BreakerConfig { failure_threshold: 1, cooldown_ms: 1_000 },
    ));
    breakers.record_failure("slow_tool");
    clock.advance(Duration::from_millis(1_500));
    let supervisor = SelfHealingSupervisor::new(clock, breakers, Arc::new(LoggingRecoveryHooks));
    let events = supervisor.evaluate_breakers();
    assert_eq!(events.len(), 1);
    assert!(matches!(&events[0], Event::HealingCircuitBreak { operation_name, .. } if operation_name == "slow_tool"));
}
