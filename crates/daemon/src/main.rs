// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `wardend`: the autonomous operations daemon binary (spec §4.10, §6).
//! Loads configuration, boots every subsystem in the fixed lifecycle
//! order, binds the local control socket, and runs until asked to stop.

use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use warden_core::SystemClock;
use warden_daemon::{Config, Daemon};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("wardend: configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config.log_level);

    let daemon = match Daemon::boot(config.clone(), SystemClock) {
        Ok(daemon) => Arc::new(daemon),
        Err(e) => {
            tracing::error!(error = %e, "failed to boot daemon");
            return ExitCode::FAILURE;
        }
    };

    let socket_path = warden_wire::socket_path(&config.state_dir);
    let listener = match warden_daemon::listener::bind(&socket_path) {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, "failed to bind control socket");
            return ExitCode::FAILURE;
        }
    };

    daemon.start();
    let listener_daemon = Arc::clone(&daemon);
    tokio::spawn(async move {
        warden_daemon::listener::serve(listener, listener_daemon).await;
    });

    tracing::info!(socket = %socket_path.display(), "wardend started");
    wait_for_shutdown_signal().await;
    tracing::info!("shutting down");
    daemon.shutdown().await;

    ExitCode::SUCCESS
}

fn init_logging(log_level: &str) {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Waits for SIGINT or SIGTERM. A platform that cannot install a SIGTERM
/// handler still shuts down cleanly on Ctrl-C.
async fn wait_for_shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        let mut terminate = match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(signal) => signal,
            Err(e) => {
                tracing::warn!(error = %e, "could not install SIGTERM handler, only SIGINT will trigger shutdown");
                let _ = ctrl_c.await;
                return;
            }
        };
        tokio::select! {
            _ = ctrl_c => {}
            _ = terminate.recv() => {}
        }
    }

    #[cfg(not(unix))]
    {
        let _ = ctrl_c.await;
    }
}
