// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Local control socket listener (spec §4.13): `warden-cli` and any other
//! local collaborator reach the running daemon over a Unix domain socket,
//! one request per connection — read one framed [`InboundEvent`], dispatch
//! it, write back one framed [`GatewayResponse`], close (teacher's
//! `listener` module runs the same accept-and-spawn shape over a longer-
//! lived request/response protocol; the one-shot-per-connection framing
//! here is this daemon's own, since `warden-wire`'s retrieved pack did not
//! include the teacher's wire codec).

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::{UnixListener, UnixStream};
use tracing::{debug, error, info};
use warden_core::Clock;
use warden_wire::{read_message, write_message, InboundEvent, IpcError};

use crate::lifecycle::Daemon;

#[derive(Debug, Error)]
pub enum ListenerError {
    #[error("failed to bind control socket at {path}: {source}")]
    Bind { path: PathBuf, source: std::io::Error },
}

/// Binds the control socket, removing any stale file left by a prior
/// unclean shutdown (spec §4.13: the socket is process-local, not
/// durable).
pub fn bind(path: &std::path::Path) -> Result<UnixListener, ListenerError> {
    if path.exists() {
        let _ = std::fs::remove_file(path);
    }
    UnixListener::bind(path).map_err(|source| ListenerError::Bind { path: path.to_path_buf(), source })
}

/// Accepts connections until the process is torn down, spawning one task
/// per connection so a slow or stuck client never blocks another (spec
/// §4.13, mirroring the accept-and-spawn shape of the teacher's gateway
/// listener).
pub async fn serve<C: Clock + 'static>(listener: UnixListener, daemon: Arc<Daemon<C>>) {
    loop {
        match listener.accept().await {
            Ok((stream, _addr)) => {
                let daemon = Arc::clone(&daemon);
                tokio::spawn(async move {
                    if let Err(e) = handle_connection(stream, &daemon).await {
                        log_connection_error(e);
                    }
                });
            }
            Err(e) => error!(error = %e, "control socket accept failed"),
        }
    }
}

fn log_connection_error(e: IpcError) {
    match e {
        IpcError::Io(ref io) if io.kind() == std::io::ErrorKind::UnexpectedEof => {
            debug!("client disconnected before sending a complete request")
        }
        other => error!(error = %other, "control socket connection error"),
    }
}

async fn handle_connection<C: Clock + 'static>(
    mut stream: UnixStream,
    daemon: &Daemon<C>,
) -> Result<(), IpcError> {
    let event: InboundEvent = read_message(&mut stream).await?;
    info!(?event, "received control socket request");
    let response = daemon.handle_inbound_event(event).await;
    write_message(&mut stream, &response).await
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;
