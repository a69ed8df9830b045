// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Health probes (C5, spec §4.5). Each probe's thresholding is a pure
//! classification function over a measurement; the `probe_*` functions are
//! thin wrappers that take the one measurement each probe needs (heap
//! stats, a store round-trip, an HTTP call) and hand it to the classifier.

use std::time::{Duration, Instant};

use warden_core::{Clock, HealthResult, HealthStatus};
use warden_storage::Store;

pub const MEMORY_UNHEALTHY_BYTES: u64 = 512 * 1024 * 1024;
pub const MEMORY_DEGRADED_BYTES: u64 = 384 * 1024 * 1024;
const API_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// This process's resident set size, read from `/proc/self/status`. Returns
/// 0 (reported healthy) on platforms or sandboxes without a `/proc`, since
/// the health-check job must never fail just because the measurement is
/// unavailable.
pub fn current_rss_bytes() -> u64 {
    let Ok(status) = std::fs::read_to_string("/proc/self/status") else { return 0 };
    status
        .lines()
        .find_map(|line| line.strip_prefix("VmRSS:"))
        .and_then(|rest| rest.trim().split_whitespace().next())
        .and_then(|kb| kb.parse::<u64>().ok())
        .map(|kb| kb * 1024)
        .unwrap_or(0)
}

fn classify_latency(latency_ms: u64, degraded_at_ms: u64, unhealthy_at_ms: u64) -> (HealthStatus, String) {
    if latency_ms > unhealthy_at_ms {
        (HealthStatus::Unhealthy, format!("{latency_ms}ms exceeds {unhealthy_at_ms}ms"))
    } else if latency_ms > degraded_at_ms {
        (HealthStatus::Degraded, format!("{latency_ms}ms exceeds {degraded_at_ms}ms"))
    } else {
        (HealthStatus::Healthy, String::new())
    }
}

/// `process` probe (spec §4.5): heap-used/heap-total percentage.
pub fn probe_process(heap_used: u64, heap_total: u64, clock: &impl Clock) -> HealthResult {
    let pct = if heap_total == 0 { 0.0 } else { heap_used as f64 / heap_total as f64 * 100.0 };
    let (status, message) = if pct > 90.0 {
        (HealthStatus::Unhealthy, format!("heap at {pct:.1}%"))
    } else if pct > 75.0 {
        (HealthStatus::Degraded, format!("heap at {pct:.1}%"))
    } else {
        (HealthStatus::Healthy, String::new())
    };
    HealthResult { component: "process".to_string(), status, latency_ms: 0, message, timestamp_ms: clock.epoch_ms() }
}

/// `memory_pressure` probe (spec §4.5): resident set size vs soft ceiling.
pub fn probe_memory_pressure(rss_bytes: u64, clock: &impl Clock) -> HealthResult {
    let (status, message) = if rss_bytes > MEMORY_UNHEALTHY_BYTES {
        (HealthStatus::Unhealthy, format!("rss {rss_bytes} bytes exceeds {MEMORY_UNHEALTHY_BYTES}"))
    } else if rss_bytes > MEMORY_DEGRADED_BYTES {
        (HealthStatus::Degraded, format!("rss {rss_bytes} bytes exceeds {MEMORY_DEGRADED_BYTES}"))
    } else {
        (HealthStatus::Healthy, String::new())
    };
    HealthResult {
        component: "memory_pressure".to_string(),
        status,
        latency_ms: 0,
        message,
        timestamp_ms: clock.epoch_ms(),
    }
}

/// `event_loop` probe (spec §4.5): schedules a no-op at the next tick and
/// measures dispatch delay.
pub async fn probe_event_loop(clock: &impl Clock) -> HealthResult {
    let start = Instant::now();
    tokio::task::yield_now().await;
    let latency_ms = start.elapsed().as_millis() as u64;
    let (status, message) = classify_latency(latency_ms, 50, 100);
    HealthResult { component: "event_loop".to_string(), status, latency_ms, message, timestamp_ms: clock.epoch_ms() }
}

/// `database` probe (spec §4.5): a trivial round-trip query against the
/// persistent store. Reads on `Store` are infallible in this embedded
/// design, so only latency is classified.
pub fn probe_database(store: &dyn Store, clock: &impl Clock) -> HealthResult {
    let start = Instant::now();
    let _ = store.tasks();
    let latency_ms = start.elapsed().as_millis() as u64;
    let (status, message) = classify_latency(latency_ms, 0, 500);
    HealthResult { component: "database".to_string(), status, latency_ms, message, timestamp_ms: clock.epoch_ms() }
}

/// `api:<url>` probe (spec §4.5): HTTP GET with a 5s timeout.
pub async fn probe_api(client: &reqwest::Client, url: &str, clock: &impl Clock) -> HealthResult {
    let component = format!("api:{url}");
    let start = Instant::now();
    let outcome = tokio::time::timeout(API_PROBE_TIMEOUT, client.get(url).send()).await;
    let latency_ms = start.elapsed().as_millis() as u64;

    let (status, message) = match outcome {
        Err(_) => (HealthStatus::Unhealthy, format!("timed out after {}ms", API_PROBE_TIMEOUT.as_millis())),
        Ok(Err(e)) => (HealthStatus::Unhealthy, e.to_string()),
        Ok(Ok(response)) if !response.status().is_success() => {
            (HealthStatus::Unhealthy, format!("status {}", response.status()))
        }
        Ok(Ok(_)) if latency_ms > 2_000 => {
            (HealthStatus::Degraded, format!("{latency_ms}ms exceeds 2000ms"))
        }
        Ok(Ok(_)) => (HealthStatus::Healthy, String::new()),
    };
    HealthResult { component, status, latency_ms, message, timestamp_ms: clock.epoch_ms() }
}

#[cfg(test)]
#[path = "health_tests.rs"]
mod tests;
