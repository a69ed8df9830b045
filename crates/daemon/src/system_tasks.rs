// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The production [`SystemTaskRunner`]: wires the scheduled system tasks
//! (health-check, breaker-evaluation, dependency-audit) into the health
//! probes (C5, spec §4.5) and the self-healing supervisor (C6, spec §4.6)
//! so they actually run on the scheduler's cadence, instead of the no-op
//! default every one of those jobs falls back to.

use std::sync::Arc;

use async_trait::async_trait;
use warden_core::{Clock, HealthStatus, Task, TaskResult, Value};
use warden_storage::Store;

use crate::event_bus::EventEmitter;
use crate::health;
use crate::orchestrator::SystemTaskRunner;
use crate::supervisor::SelfHealingSupervisor;

pub struct DaemonSystemTaskRunner<C: Clock> {
    clock: C,
    store: Arc<dyn Store>,
    supervisor: Arc<SelfHealingSupervisor<C>>,
    events: EventEmitter,
    http: reqwest::Client,
    dependency_audit_urls: Vec<String>,
}

impl<C: Clock> DaemonSystemTaskRunner<C> {
    pub fn new(
        clock: C,
        store: Arc<dyn Store>,
        supervisor: Arc<SelfHealingSupervisor<C>>,
        events: EventEmitter,
        dependency_audit_urls: Vec<String>,
    ) -> Self {
        Self { clock, store, supervisor, events, http: reqwest::Client::new(), dependency_audit_urls }
    }
}

#[async_trait]
impl<C: Clock> SystemTaskRunner for DaemonSystemTaskRunner<C> {
    /// Runs the probe battery (memory pressure, database, event loop) and
    /// folds the results into the supervisor's report, which drives
    /// consecutive-unhealthy recovery (spec §4.5, §4.6).
    async fn health_check(&self, _task: &Task) -> TaskResult {
        let results = vec![
            health::probe_memory_pressure(health::current_rss_bytes(), &self.clock),
            health::probe_database(&*self.store, &self.clock),
            health::probe_event_loop(&self.clock).await,
        ];
        let any_unhealthy = results.iter().any(|r| r.status == HealthStatus::Unhealthy);
        let probe_count = results.len();
        for event in self.supervisor.record_report(results).await {
            self.events.emit(event);
        }
        if any_unhealthy {
            TaskResult::failed("one or more health probes reported unhealthy", 0)
        } else {
            TaskResult::ok(Value::from(serde_json::json!({ "probes": probe_count })), 0)
        }
    }

    /// Promotes elapsed-cooldown breakers to half-open and emits a healing
    /// event per promotion (spec §4.6 "drives circuit-breaker evaluation").
    async fn breaker_evaluation(&self, _task: &Task) -> TaskResult {
        let events = self.supervisor.evaluate_breakers();
        let promoted = events.len();
        for event in events {
            self.events.emit(event);
        }
        TaskResult::ok(Value::from(serde_json::json!({ "promoted": promoted })), 0)
    }

    /// Probes every configured external dependency URL (spec §4.6 "≈ every
    /// 6h"); a daemon with none configured treats the audit as a no-op
    /// success rather than failing it.
    async fn dependency_audit(&self, _task: &Task) -> TaskResult {
        if self.dependency_audit_urls.is_empty() {
            return TaskResult::ok(Value::Null, 0);
        }
        let results = self.supervisor.run_dependency_audit(&self.http, &self.dependency_audit_urls).await;
        let probed = results.len();
        for event in self.supervisor.record_report(results).await {
            self.events.emit(event);
        }
        TaskResult::ok(Value::from(serde_json::json!({ "probed": probed })), 0)
    }
}

#[cfg(test)]
#[path = "system_tasks_tests.rs"]
mod tests;
