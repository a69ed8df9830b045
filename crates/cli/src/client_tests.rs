// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use warden_core::{FakeClock, Priority, ScheduledJobId, TaskType, Value};
use warden_daemon::config::Config;
use warden_daemon::lifecycle::Daemon;
use warden_daemon::scheduler::WorkerMode;

use super::DaemonClient;

fn config(state_dir: &std::path::Path) -> Config {
    Config {
        state_dir: state_dir.to_path_buf(),
        gateway_host: "127.0.0.1".to_string(),
        gateway_port: 0,
        gateway_secret: None,
        log_level: "info".to_string(),
        log_dir: None,
        health_interval_ms: 30_000,
        breaker: warden_core::BreakerConfig { failure_threshold: 5, cooldown_ms: 30_000 },
        model_id: "test".to_string(),
        worker_mode: WorkerMode::Single,
        dependency_audit_urls: Vec::new(),
    }
}

async fn running_daemon(dir: &std::path::Path) -> Arc<Daemon<FakeClock>> {
    let daemon = Arc::new(Daemon::boot(config(dir), FakeClock::new()).unwrap());
    let path = warden_wire::socket_path(dir);
    let listener = warden_daemon::listener::bind(&path).unwrap();
    let serve_daemon = Arc::clone(&daemon);
    tokio::spawn(async move {
        warden_daemon::listener::serve(listener, serve_daemon).await;
    });
    tokio::task::yield_now().await;
    daemon
}

#[tokio::test]
async fn submit_task_returns_the_accepted_task_id() {
    let dir = tempfile::tempdir().unwrap();
    let _daemon = running_daemon(dir.path()).await;
    let client = DaemonClient::new(dir.path().to_path_buf());

    let task_id = client
        .submit_task(
            TaskType::System,
            Priority::High,
            "check disk usage".to_string(),
            String::new(),
            Value::Null,
        )
        .await
        .unwrap();

    assert_eq!(task_id.to_string().split(':').next(), Some("task"));
}

#[tokio::test]
async fn list_jobs_returns_the_installed_default_jobs() {
    let dir = tempfile::tempdir().unwrap();
    let _daemon = running_daemon(dir.path()).await;
    let client = DaemonClient::new(dir.path().to_path_buf());

    let jobs = client.list_jobs().await.unwrap();
    assert!(!jobs.is_empty());
}

#[tokio::test]
async fn toggle_job_disables_a_known_job() {
    let dir = tempfile::tempdir().unwrap();
    let _daemon = running_daemon(dir.path()).await;
    let client = DaemonClient::new(dir.path().to_path_buf());

    let jobs = client.list_jobs().await.unwrap();
    let (_prefix, uuid) = jobs[0].id.split_once(':').unwrap();
    let job_id = ScheduledJobId::parse(uuid).unwrap();

    client.toggle_job(job_id, false).await.unwrap();

    let jobs = client.list_jobs().await.unwrap();
    let toggled = jobs.iter().find(|j| j.id == job_id.to_string()).unwrap();
    assert!(!toggled.enabled);
}

#[tokio::test]
async fn run_self_evaluation_returns_a_task_id() {
    let dir = tempfile::tempdir().unwrap();
    let _daemon = running_daemon(dir.path()).await;
    let client = DaemonClient::new(dir.path().to_path_buf());

    client.run_self_evaluation().await.unwrap();
}

#[tokio::test]
async fn status_reports_a_zero_queue_depth_when_idle() {
    let dir = tempfile::tempdir().unwrap();
    let _daemon = running_daemon(dir.path()).await;
    let client = DaemonClient::new(dir.path().to_path_buf());

    let (_uptime_ms, queue_depth, _heartbeat_tick) = client.status().await.unwrap();
    assert_eq!(queue_depth, 0);
}

#[tokio::test]
async fn connecting_to_a_daemon_that_is_not_running_fails_with_connect_error() {
    let dir = tempfile::tempdir().unwrap();
    let client = DaemonClient::new(dir.path().to_path_buf());

    let result = client.memory_stats().await;
    assert!(matches!(result, Err(super::ClientError::Connect { .. })));
}
