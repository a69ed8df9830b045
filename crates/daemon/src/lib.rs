// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! warden-daemon: process lifecycle, scheduling, and the local control
//! socket for the autonomous operations daemon. Builds on `warden-core`,
//! `warden-storage`, `warden-engine`, `warden-adapters`, and `warden-wire`;
//! ties them into a single bootable, health-checked, gracefully
//! shutdownable process (spec §4.10).

pub mod config;
pub mod event_bus;
pub mod health;
pub mod lifecycle;
pub mod listener;
pub mod orchestrator;
pub mod scheduler;
pub mod supervisor;
pub mod system_tasks;

pub use config::{Config, ConfigError};
pub use event_bus::{EventEmitter, EventSubscriber};
pub use lifecycle::{Daemon, LifecycleError};
pub use orchestrator::{
    HandlerContext, NoopMessagingHandler, NoopSystemTaskRunner, Orchestrator, SystemTaskRunner, TaskHandler,
};
pub use scheduler::{Scheduler, WorkerMode};
pub use supervisor::{LoggingRecoveryHooks, RecoveryHooks, SelfHealingSupervisor};
pub use system_tasks::DaemonSystemTaskRunner;
