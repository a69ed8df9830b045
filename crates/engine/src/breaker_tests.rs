// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::time::Duration;
use warden_core::FakeClock;

fn registry() -> (CircuitBreakerRegistry<FakeClock>, FakeClock) {
    let clock = FakeClock::new();
    let config = BreakerConfig { failure_threshold: 3, cooldown_ms: 50 };
    (CircuitBreakerRegistry::new(clock.clone(), config), clock)
}

#[test]
fn unknown_operation_is_implicitly_closed() {
    let (registry, _clock) = registry();
    assert!(registry.can_execute("x"));
}

#[test]
fn breaker_lifecycle_scenario_from_spec() {
    let (registry, clock) = registry();
    registry.record_failure("x");
    registry.record_failure("x");
    registry.record_failure("x");
    assert!(!registry.can_execute("x"));

    clock.advance(Duration::from_millis(60));
    assert!(registry.can_execute("x"));
    let state = registry.get_state().into_iter().find(|s| s.operation_name == "x").unwrap();
    assert_eq!(state.state, BreakerState::HalfOpen);

    registry.record_success("x");
    let state = registry.get_state().into_iter().find(|s| s.operation_name == "x").unwrap();
    assert_eq!(state.state, BreakerState::Closed);
    assert_eq!(state.failure_count, 0);
}

#[test]
fn half_open_failure_returns_to_open() {
    let (registry, clock) = registry();
    registry.record_failure("x");
    registry.record_failure("x");
    registry.record_failure("x");
    clock.advance(Duration::from_millis(60));
    assert!(registry.can_execute("x"));
    registry.record_failure("x");
    assert!(!registry.can_execute("x"));
}

#[test]
fn reset_clears_state_unconditionally() {
    let (registry, _clock) = registry();
    registry.record_failure("x");
    registry.record_failure("x");
    registry.record_failure("x");
    registry.reset("x");
    let state = registry.get_state().into_iter().find(|s| s.operation_name == "x").unwrap();
    assert_eq!(state.state, BreakerState::Closed);
    assert_eq!(state.failure_count, 0);
}

#[test]
fn evaluate_promotes_elapsed_cooldown_breakers_and_returns_changed() {
    let (registry, clock) = registry();
    registry.record_failure("x");
    registry.record_failure("x");
    registry.record_failure("x");
    clock.advance(Duration::from_millis(60));
    let changed = registry.evaluate();
    assert_eq!(changed.len(), 1);
    assert_eq!(changed[0].state, BreakerState::HalfOpen);
}
