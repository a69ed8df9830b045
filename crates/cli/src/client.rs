// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Connection to a running `wardend` over its local control socket.

use std::path::PathBuf;

use thiserror::Error;
use tokio::net::UnixStream;
use warden_core::{Priority, ScheduledJobId, TaskType, Value};
use warden_wire::{
    socket_path, GatewayCommand, GatewayResponse, InboundEvent, IpcError, TaskSubmission,
};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("could not connect to the daemon at {path}: {source}")]
    Connect { path: PathBuf, source: std::io::Error },
    #[error("lost connection to the daemon: {0}")]
    Transport(#[from] IpcError),
    #[error("daemon reported an error: {0}")]
    Daemon(String),
    #[error("unexpected response from daemon: {0:?}")]
    UnexpectedResponse(GatewayResponse),
}

/// Resolve the daemon's state directory the same way `wardend` does:
/// `WARDEN_STATE_DIR` overrides everything, then `XDG_STATE_HOME`, then
/// `~/.local/state/warden`.
pub fn state_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("WARDEN_STATE_DIR") {
        return PathBuf::from(dir);
    }
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return PathBuf::from(xdg).join("warden");
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| "/root".to_string());
    PathBuf::from(home).join(".local/state/warden")
}

pub struct DaemonClient {
    socket: PathBuf,
}

impl DaemonClient {
    pub fn new(state_dir: PathBuf) -> Self {
        Self { socket: socket_path(&state_dir) }
    }

    async fn send(&self, event: InboundEvent) -> Result<GatewayResponse, ClientError> {
        let mut stream = UnixStream::connect(&self.socket)
            .await
            .map_err(|source| ClientError::Connect { path: self.socket.clone(), source })?;
        warden_wire::write_message(&mut stream, &event).await?;
        let response: GatewayResponse = warden_wire::read_message(&mut stream).await?;
        if let GatewayResponse::Error { message } = response {
            return Err(ClientError::Daemon(message));
        }
        Ok(response)
    }

    async fn command(&self, command: GatewayCommand) -> Result<GatewayResponse, ClientError> {
        self.send(InboundEvent::GatewayCommand { command }).await
    }

    pub async fn submit_task(
        &self,
        kind: TaskType,
        priority: Priority,
        title: String,
        description: String,
        payload: Value,
    ) -> Result<warden_core::TaskId, ClientError> {
        match self
            .command(GatewayCommand::TaskCreate { task: TaskSubmission { kind, priority, title, description, payload } })
            .await?
        {
            GatewayResponse::TaskAccepted { task_id } => Ok(task_id),
            other => Err(ClientError::UnexpectedResponse(other)),
        }
    }

    pub async fn list_jobs(&self) -> Result<Vec<warden_wire::ScheduledJobSummary>, ClientError> {
        match self.command(GatewayCommand::JobList).await? {
            GatewayResponse::Jobs { jobs } => Ok(jobs),
            other => Err(ClientError::UnexpectedResponse(other)),
        }
    }

    pub async fn toggle_job(&self, job_id: ScheduledJobId, enabled: bool) -> Result<(), ClientError> {
        match self.command(GatewayCommand::JobToggle { job_id, enabled }).await? {
            GatewayResponse::Ok => Ok(()),
            other => Err(ClientError::UnexpectedResponse(other)),
        }
    }

    pub async fn run_self_evaluation(&self) -> Result<warden_core::TaskId, ClientError> {
        match self.command(GatewayCommand::SelfEvalRun).await? {
            GatewayResponse::TaskAccepted { task_id } => Ok(task_id),
            other => Err(ClientError::UnexpectedResponse(other)),
        }
    }

    pub async fn memory_stats(&self) -> Result<usize, ClientError> {
        match self.command(GatewayCommand::MemoryStats).await? {
            GatewayResponse::MemoryStats { count } => Ok(count),
            other => Err(ClientError::UnexpectedResponse(other)),
        }
    }

    pub async fn status(&self) -> Result<(u64, usize, u64), ClientError> {
        match self.command(GatewayCommand::DaemonStatus).await? {
            GatewayResponse::DaemonStatus { uptime_ms, queue_depth, heartbeat_tick } => {
                Ok((uptime_ms, queue_depth, heartbeat_tick))
            }
            other => Err(ClientError::UnexpectedResponse(other)),
        }
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
