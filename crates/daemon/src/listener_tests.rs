// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use tokio::net::UnixStream;
use warden_core::{FakeClock, Priority, TaskType, Value};
use warden_wire::{read_message, socket_path, write_message, GatewayResponse, InboundEvent, TaskSubmission};

use super::{bind, serve};
use crate::config::Config;
use crate::lifecycle::Daemon;

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
        worker_mode: crate::scheduler::WorkerMode::Single,
        dependency_audit_urls: Vec::new(),
    }
}

#[tokio::test]
async fn a_task_submission_round_trips_over_the_control_socket() {
    let dir = tempfile::tempdir().unwrap();
    let daemon = Arc::new(Daemon::boot(config(dir.path()), FakeClock::new()).unwrap());
    let path = socket_path(dir.path());
    let listener = bind(&path).unwrap();

    let daemon_clone = Arc::clone(&daemon);
    tokio::spawn(async move {
        serve(listener, daemon_clone).await;
    });
    tokio::task::yield_now().await;

    let mut client = UnixStream::connect(&path).await.unwrap();
    write_message(
        &mut client,
        &InboundEvent::TaskSubmit {
            task: TaskSubmission {
                kind: TaskType::System,
                priority: Priority::Low,
                title: "via socket".to_string(),
                description: String::new(),
                payload: Value::Null,
            },
        },
    )
    .await
    .unwrap();

    let response: GatewayResponse = read_message(&mut client).await.unwrap();
    assert!(matches!(response, GatewayResponse::TaskAccepted { .. }));
}

#[tokio::test]
async fn bind_removes_a_stale_socket_file_left_by_a_prior_run() {
    let dir = tempfile::tempdir().unwrap();
    let path = socket_path(dir.path());
    std::fs::write(&path, b"stale").unwrap();

    let listener = bind(&path).unwrap();
    drop(listener);
}
