// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Environment-variable driven configuration (spec §6, SPEC_FULL §4.13).
//! Parsed once at boot (step 1 of the lifecycle manager, C10) and never
//! re-read afterward (spec §9 "global mutable state").

use std::path::PathBuf;
use std::time::Duration;

use warden_core::BreakerConfig;

use crate::scheduler::WorkerMode;

/// Daemon-wide configuration, resolved from environment variables with
/// documented defaults (SPEC_FULL §4.13).
#[derive(Debug, Clone)]
pub struct Config {
    pub state_dir: PathBuf,
    pub gateway_host: String,
    pub gateway_port: u16,
    pub gateway_secret: Option<String>,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
    pub health_interval_ms: u64,
    pub breaker: BreakerConfig,
    pub model_id: String,
    pub worker_mode: WorkerMode,
    pub dependency_audit_urls: Vec<String>,
}

impl Config {
    /// Resolve configuration for this process. State directory resolution
    /// order mirrors the teacher's `daemon::env::state_dir`: an explicit
    /// override, then an XDG base, then a hardcoded fallback.
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self {
            state_dir: state_dir()?,
            gateway_host: env_string("WARDEN_GATEWAY_HOST", "127.0.0.1"),
            gateway_port: env_parsed("WARDEN_GATEWAY_PORT", 8781),
            gateway_secret: std::env::var("WARDEN_GATEWAY_SECRET").ok().filter(|s| !s.is_empty()),
            log_level: env_string("WARDEN_LOG_LEVEL", "info"),
            log_dir: std::env::var("WARDEN_LOG_DIR").ok().map(PathBuf::from),
            health_interval_ms: env_parsed("WARDEN_HEALTH_INTERVAL_MS", 30_000),
            breaker: BreakerConfig {
                failure_threshold: env_parsed("WARDEN_BREAKER_THRESHOLD", 5),
                cooldown_ms: env_parsed("WARDEN_BREAKER_COOLDOWN_MS", 30_000),
            },
            model_id: env_string("WARDEN_MODEL_ID", "default"),
            worker_mode: match std::env::var("WARDEN_WORKER_POOL_SIZE").ok().and_then(|s| s.parse().ok()) {
                Some(n) if n > 1 => WorkerMode::Pool(n),
                _ => WorkerMode::Single,
            },
            dependency_audit_urls: std::env::var("WARDEN_DEPENDENCY_AUDIT_URLS")
                .ok()
                .map(|v| v.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_string).collect())
                .unwrap_or_default(),
        })
    }

    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_millis(10_000)
    }
}

/// State directory: `WARDEN_STATE_DIR` > `XDG_STATE_HOME/warden` >
/// `~/.local/state/warden` (teacher's `state_dir()` resolution order).
fn state_dir() -> Result<PathBuf, ConfigError> {
    if let Ok(dir) = std::env::var("WARDEN_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("warden"));
    }
    let home = std::env::var("HOME").map_err(|_| ConfigError::NoStateDir)?;
    Ok(PathBuf::from(home).join(".local/state/warden"))
}

fn env_string(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

/// Credential lookup for a collaborator family (messaging, payments,
/// banking, trading), keyed `WARDEN_CRED_<FAMILY>_<NAME>` (spec §6).
pub fn collaborator_credential(family: &str, name: &str) -> Option<String> {
    let key = format!("WARDEN_CRED_{}_{}", family.to_uppercase(), name.to_uppercase());
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine state directory: set WARDEN_STATE_DIR or HOME")]
    NoStateDir,
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
