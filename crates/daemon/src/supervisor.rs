// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Self-healing supervisor (C6, spec §4.6). Aggregates health reports into
//! a last-report snapshot, tracks a consecutive-unhealthy counter, and
//! triggers per-component best-effort recovery after three consecutive
//! unhealthy reports. Also drives circuit-breaker evaluation and the
//! low-frequency dependency audit.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{info, warn};
use warden_core::{BreakerState, CircuitBreakerState, Clock, Event, HealthResult, HealthStatus};
use warden_engine::CircuitBreakerRegistry;

/// Consecutive unhealthy reports required to trigger recovery (spec §4.6).
const UNHEALTHY_THRESHOLD: u32 = 3;
/// Dependency audit cadence (spec §4.6 "≈ every 6h").
pub const DEPENDENCY_AUDIT_INTERVAL_MS: u64 = 6 * 60 * 60 * 1000;

/// Per-component recovery actions (spec §4.6). Best-effort: a failing hook
/// is logged and never escalated to a panic or process exit.
#[async_trait]
pub trait RecoveryHooks: Send + Sync {
    async fn recover_process(&self) {}
    async fn recover_memory_pressure(&self) {}
    async fn recover_database(&self) {}
    async fn recover_event_loop(&self) {}
    async fn recover_api(&self, _url: &str) {}
}

/// The default recovery policy: log and continue (spec §4.6
/// "process/memory_pressure → request GC if available; never fatal";
/// "event_loop → log and continue"; "api:* → log and defer to next cycle").
/// Collaborators that can actually reinitialize a dependency (e.g. the
/// store) override `recover_database`.
#[derive(Debug, Default)]
pub struct LoggingRecoveryHooks;

#[async_trait]
impl RecoveryHooks for LoggingRecoveryHooks {
    async fn recover_process(&self) {
        warn!("process unhealthy: requesting GC if the runtime supports it");
    }
    async fn recover_memory_pressure(&self) {
        warn!("memory_pressure unhealthy: requesting GC if the runtime supports it");
    }
    async fn recover_database(&self) {
        warn!("database unhealthy: reinitialization requested");
    }
    async fn recover_event_loop(&self) {
        warn!("event_loop unhealthy: continuing, no recovery action available");
    }
    async fn recover_api(&self, url: &str) {
        warn!(url, "api unhealthy: deferring to next health cycle");
    }
}

struct SupervisorState {
    last_report: Vec<HealthResult>,
    consecutive_unhealthy: u32,
    last_dependency_audit_ms: u64,
}

pub struct SelfHealingSupervisor<C: Clock> {
    clock: C,
    breakers: Arc<CircuitBreakerRegistry<C>>,
    recovery: Arc<dyn RecoveryHooks>,
    state: Mutex<SupervisorState>,
}

impl<C: Clock> SelfHealingSupervisor<C> {
    pub fn new(clock: C, breakers: Arc<CircuitBreakerRegistry<C>>, recovery: Arc<dyn RecoveryHooks>) -> Self {
        Self {
            clock,
            breakers,
            recovery,
            state: Mutex::new(SupervisorState {
                last_report: Vec::new(),
                consecutive_unhealthy: 0,
                last_dependency_audit_ms: 0,
            }),
        }
    }

    /// Records one run of the probe battery (spec §4.6). Always returns a
    /// `healing:health_check` event; returns a `healing:recovery` event per
    /// unhealthy component the third consecutive time any probe is
    /// unhealthy, after invoking that component's recovery hook exactly
    /// once.
    pub async fn record_report(&self, results: Vec<HealthResult>) -> Vec<Event> {
        let any_unhealthy = results.iter().any(|r| r.status == HealthStatus::Unhealthy);
        let mut events = vec![Event::HealingHealthCheck { results: results.clone() }];

        let should_recover = {
            let mut state = self.state.lock();
            state.last_report = results.clone();
            state.consecutive_unhealthy = if any_unhealthy { state.consecutive_unhealthy + 1 } else { 0 };
            let trigger = state.consecutive_unhealthy >= UNHEALTHY_THRESHOLD;
            if trigger {
                state.consecutive_unhealthy = 0;
            }
            trigger
        };

        if should_recover {
            for result in results.iter().filter(|r| r.status == HealthStatus::Unhealthy) {
                self.recover(&result.component).await;
                events.push(Event::HealingRecovery { component: result.component.clone() });
            }
        }

        events
    }

    async fn recover(&self, component: &str) {
        match component {
            "process" => self.recovery.recover_process().await,
            "memory_pressure" => self.recovery.recover_memory_pressure().await,
            "database" => self.recovery.recover_database().await,
            "event_loop" => self.recovery.recover_event_loop().await,
            other if other.starts_with("api:") => {
                self.recovery.recover_api(other.trim_start_matches("api:")).await
            }
            other => warn!(component = other, "no recovery hook registered for component"),
        }
    }

    pub fn last_report(&self) -> Vec<HealthResult> {
        self.state.lock().last_report.clone()
    }

    pub fn consecutive_unhealthy(&self) -> u32 {
        self.state.lock().consecutive_unhealthy
    }

    /// Evaluates the breaker registry, promoting elapsed-cooldown breakers
    /// to half-open, and returns the healing events for any that changed
    /// (spec §4.6 "drives circuit-breaker evaluation").
    pub fn evaluate_breakers(&self) -> Vec<Event> {
        self.breakers
            .evaluate()
            .into_iter()
            .map(|breaker: CircuitBreakerState| {
                debug_assert_eq!(breaker.state, BreakerState::HalfOpen);
                Event::HealingCircuitBreak { operation_name: breaker.operation_name, state: breaker.state }
            })
            .collect()
    }

    /// Whether the ≈6h dependency audit is due (spec §4.6).
    pub fn dependency_audit_due(&self) -> bool {
        let state = self.state.lock();
        self.clock.epoch_ms().saturating_sub(state.last_dependency_audit_ms) >= DEPENDENCY_AUDIT_INTERVAL_MS
    }

    /// Probes each declared external endpoint and records that the audit
    /// ran, regardless of outcome (spec §4.6).
    pub async fn run_dependency_audit(&self, client: &reqwest::Client, urls: &[String]) -> Vec<HealthResult> {
        let mut results = Vec::with_capacity(urls.len());
        for url in urls {
            results.push(crate::health::probe_api(client, url, &self.clock).await);
        }
        self.state.lock().last_dependency_audit_ms = self.clock.epoch_ms();
        info!(count = results.len(), "ran dependency audit");
        results
    }
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;
