// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use warden_core::FakeClock;
use warden_storage::InMemoryStore;

#[test]
fn process_probe_thresholds() {
    let clock = FakeClock::new();
    assert_eq!(probe_process(10, 100, &clock).status, HealthStatus::Healthy);
    assert_eq!(probe_process(80, 100, &clock).status, HealthStatus::Degraded);
    assert_eq!(probe_process(95, 100, &clock).status, HealthStatus::Unhealthy);
}

#[test]
fn memory_pressure_probe_thresholds() {
    let clock = FakeClock::new();
    assert_eq!(probe_memory_pressure(100 * 1024 * 1024, &clock).status, HealthStatus::Healthy);
    assert_eq!(probe_memory_pressure(400 * 1024 * 1024, &clock).status, HealthStatus::Degraded);
    assert_eq!(probe_memory_pressure(600 * 1024 * 1024, &clock).status, HealthStatus::Unhealthy);
}

#[test]
fn database_probe_is_healthy_against_an_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = InMemoryStore::open(dir.path()).unwrap();
    let clock = FakeClock::new();
    let result = probe_database(&store, &clock);
    assert_eq!(result.component, "database");
    assert_eq!(result.status, HealthStatus::Healthy);
}

#[tokio::test]
async fn event_loop_probe_reports_healthy_under_normal_conditions() {
    let clock = FakeClock::new();
    let result = probe_event_loop(&clock).await;
    assert_eq!(result.component, "event_loop");
    assert_eq!(result.status, HealthStatus::Healthy);
}

#[test]
fn current_rss_bytes_never_panics() {
    let _ = current_rss_bytes();
}
