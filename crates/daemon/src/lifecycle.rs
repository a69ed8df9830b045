// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subsystem lifecycle manager (C10, spec §4.10). Boots every governed
//! subsystem in a fixed order — instance lock, store, ledger, governance,
//! message bus and event bus, breaker registry, supervisor, orchestrator,
//! tool registry, scheduler, gateway last — and tears them down in the
//! exact reverse, best-effort.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use fs2::FileExt;
use parking_lot::RwLock;
use tracing::warn;
use warden_adapters::{GatewayTransport, NullGateway, UnimplementedToolHandler};
use warden_core::{AgentRole, Clock, InputSchema, Priority, RiskLevel, TaskType, ToolDescriptor};
use warden_engine::{AuditLedger, CircuitBreakerRegistry, EngineError, GovernanceEngine, MessageBus, ToolRegistry};
use warden_storage::{InMemoryStore, Store};
use warden_wire::{GatewayCommand, GatewayResponse, InboundEvent, ScheduledJobSummary, StateQuery, TaskSubmission};

use crate::config::{Config, ConfigError};
use crate::event_bus::EventEmitter;
use crate::orchestrator::{NoopMessagingHandler, Orchestrator};
use crate::scheduler::Scheduler;
use crate::supervisor::{LoggingRecoveryHooks, SelfHealingSupervisor};
use crate::system_tasks::DaemonSystemTaskRunner;

/// Bus maintenance cadence (spec §4.4 "background maintenance, every 60s").
const BUS_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("storage error: {0}")]
    Storage(#[from] warden_storage::StorageError),
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
    #[error("failed to acquire daemon lock: another wardend is already running for this state dir")]
    LockFailed(#[source] std::io::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Acquires an exclusive advisory lock on `<state_dir>/wardend.lock`,
/// writing this process's pid. Held for the process lifetime; dropping the
/// file releases the lock.
fn acquire_instance_lock(state_dir: &std::path::Path) -> Result<std::fs::File, LifecycleError> {
    std::fs::create_dir_all(state_dir)?;
    let lock_path = state_dir.join("wardend.lock");
    let mut lock_file =
        std::fs::OpenOptions::new().write(true).create(true).truncate(false).open(&lock_path)?;
    lock_file.try_lock_exclusive().map_err(LifecycleError::LockFailed)?;
    lock_file.set_len(0)?;
    writeln!(lock_file, "{}", std::process::id())?;
    Ok(lock_file)
}

/// Every governed subsystem, wired together per the fixed boot order. Held
/// by `main` for the process lifetime; `start`/`shutdown` are each
/// idempotent at the subsystem level they delegate to.
pub struct Daemon<C: Clock> {
    clock: C,
    boot_at_ms: u64,
    _instance_lock: std::fs::File,
    store: Arc<dyn Store>,
    ledger: Arc<AuditLedger<C>>,
    governance: Arc<GovernanceEngine<C>>,
    bus: Arc<MessageBus<C>>,
    breakers: Arc<CircuitBreakerRegistry<C>>,
    supervisor: Arc<SelfHealingSupervisor<C>>,
    orchestrator: Arc<Orchestrator<C>>,
    tool_registry: Arc<ToolRegistry<C>>,
    scheduler: Arc<Scheduler<C>>,
    events: EventEmitter,
    gateway: Arc<RwLock<Arc<dyn GatewayTransport>>>,
}

impl<C: Clock + 'static> Daemon<C> {
    /// Boots every subsystem in the fixed order (spec §4.10 step list).
    /// The gateway starts as a [`NullGateway`]; a real transport is wired
    /// in afterward with [`Daemon::attach_gateway`], "last" per the
    /// lifecycle order, since it is the only subsystem that depends on
    /// every other one being ready.
    pub fn boot(config: Config, clock: C) -> Result<Self, LifecycleError> {
        let boot_at_ms = clock.epoch_ms();
        let instance_lock = acquire_instance_lock(&config.state_dir)?;

        let store: Arc<dyn Store> = Arc::new(InMemoryStore::open(&config.state_dir)?);
        let ledger = Arc::new(AuditLedger::new(Arc::clone(&store), clock.clone()));
        let governance = Arc::new(GovernanceEngine::new(clock.clone()));
        let bus = Arc::new(MessageBus::new(clock.clone()));
        let (events, _first_subscriber) = EventEmitter::new();
        let breakers = Arc::new(CircuitBreakerRegistry::new(clock.clone(), config.breaker));
        let supervisor =
            Arc::new(SelfHealingSupervisor::new(clock.clone(), Arc::clone(&breakers), Arc::new(LoggingRecoveryHooks)));
        let system_runner = Arc::new(DaemonSystemTaskRunner::new(
            clock.clone(),
            Arc::clone(&store),
            Arc::clone(&supervisor),
            events.clone(),
            config.dependency_audit_urls.clone(),
        ));
        let mut orchestrator = Orchestrator::new(clock.clone(), Arc::clone(&store), events.clone(), system_runner);
        orchestrator.register_handler(AgentRole::Messaging, Arc::new(NoopMessagingHandler));
        let orchestrator = Arc::new(orchestrator);

        let mut tool_registry =
            ToolRegistry::new(clock.clone(), Arc::clone(&governance), Arc::clone(&breakers), Arc::clone(&ledger));
        tool_registry.register(
            ToolDescriptor {
                name: "send_message",
                description: "send a message on a messaging channel",
                category: "messaging",
                input_schema: InputSchema::default(),
                requires_approval: false,
                risk_level: RiskLevel::Low,
            },
            Arc::new(UnimplementedToolHandler::new("send_message")),
        )?;
        tool_registry.register(
            ToolDescriptor {
                name: "list_channels",
                description: "list the messaging channels visible to the caller",
                category: "messaging",
                input_schema: InputSchema::default(),
                requires_approval: false,
                risk_level: RiskLevel::Low,
            },
            Arc::new(UnimplementedToolHandler::new("list_channels")),
        )?;
        let tool_registry = Arc::new(tool_registry);
        let scheduler =
            Scheduler::new(clock.clone(), Arc::clone(&store), Arc::clone(&orchestrator), events.clone(), config.worker_mode);
        scheduler.install_default_jobs();
        let gateway: Arc<RwLock<Arc<dyn GatewayTransport>>> =
            Arc::new(RwLock::new(Arc::new(NullGateway) as Arc<dyn GatewayTransport>));

        Ok(Self {
            clock,
            boot_at_ms,
            _instance_lock: instance_lock,
            store,
            ledger,
            governance,
            bus,
            breakers,
            supervisor,
            orchestrator,
            tool_registry,
            scheduler,
            events,
            gateway,
        })
    }

    /// Swaps in the real gateway transport (spec §4.10 "gateway last").
    pub fn attach_gateway(&self, gateway: Arc<dyn GatewayTransport>) {
        *self.gateway.write() = gateway;
    }

    pub fn audit_ledger(&self) -> &Arc<AuditLedger<C>> {
        &self.ledger
    }

    pub fn governance(&self) -> &Arc<GovernanceEngine<C>> {
        &self.governance
    }

    pub fn message_bus(&self) -> &Arc<MessageBus<C>> {
        &self.bus
    }

    pub fn breaker_registry(&self) -> &Arc<CircuitBreakerRegistry<C>> {
        &self.breakers
    }

    pub fn tool_registry(&self) -> &Arc<ToolRegistry<C>> {
        &self.tool_registry
    }

    pub fn supervisor(&self) -> &Arc<SelfHealingSupervisor<C>> {
        &self.supervisor
    }

    /// Requeues any task left started-but-never-completed by a previous
    /// crash, starts the scheduler's drain/timer loop, and begins
    /// forwarding every emitted event to the attached gateway (spec §4.10,
    /// §4.8 "tasks are never lost").
    pub fn start(&self) {
        for task in self.orchestrator.abandoned_tasks() {
            let _ = self.scheduler.enqueue_task(task);
        }
        self.scheduler.start();

        let mut subscriber = self.events.subscribe();
        let gateway = Arc::clone(&self.gateway);
        tokio::spawn(async move {
            while let Some(event) = subscriber.recv().await {
                let transport = gateway.read().clone();
                if let Err(e) = transport.publish(event).await {
                    warn!(error = %e, "failed to publish event to gateway");
                }
            }
        });

        let bus = Arc::clone(&self.bus);
        let events = self.events.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(BUS_SWEEP_INTERVAL);
            loop {
                ticker.tick().await;
                for message_id in bus.sweep_expired() {
                    events.emit(warden_core::Event::BusExpired { message_id });
                }
            }
        });
    }

    /// Tears down in the exact reverse of the boot order, best-effort
    /// (spec §4.10): stop accepting new work, then flush the store so no
    /// committed write is lost.
    pub async fn shutdown(&self) {
        self.scheduler.stop();
        if let Err(e) = self.store.checkpoint() {
            warn!(error = %e, "checkpoint failed during shutdown");
        }
    }

    /// Dispatches one `gateway:command` subchannel to the owning subsystem
    /// (spec §6).
    pub async fn handle_command(&self, command: GatewayCommand) -> GatewayResponse {
        match command {
            GatewayCommand::TaskCreate { task } => self.submit_task(task),
            GatewayCommand::JobList => self.job_summaries(),
            GatewayCommand::JobToggle { job_id, enabled } => {
                self.scheduler.toggle_job(job_id, enabled);
                GatewayResponse::Ok
            }
            GatewayCommand::SelfEvalRun => self.run_self_evaluation(),
            GatewayCommand::MemoryStats => GatewayResponse::MemoryStats { count: self.store.memories().len() },
            GatewayCommand::DaemonStatus => self.daemon_status(),
        }
    }

    /// Answers the three documented `state:request` queries (spec §6,
    /// §9 "replace callback-style state queries with a request/reply
    /// abstraction").
    pub fn handle_state_query(&self, query: StateQuery) -> GatewayResponse {
        match query {
            StateQuery::DaemonStatus => self.daemon_status(),
            StateQuery::JobList => self.job_summaries(),
            StateQuery::MemoryStats => GatewayResponse::MemoryStats { count: self.store.memories().len() },
        }
    }

    /// Top-level entry point for anything arriving over the gateway
    /// transport (spec §6: `task:submit`, `state:request`,
    /// `gateway:command`).
    pub async fn handle_inbound_event(&self, event: InboundEvent) -> GatewayResponse {
        match event {
            InboundEvent::TaskSubmit { task } => self.submit_task(task),
            InboundEvent::StateRequest { query } => self.handle_state_query(query),
            InboundEvent::GatewayCommand { command } => self.handle_command(command).await,
        }
    }

    fn submit_task(&self, submission: TaskSubmission) -> GatewayResponse {
        match self.orchestrator.create_task(
            submission.kind,
            submission.priority,
            submission.title,
            submission.description,
            submission.payload,
        ) {
            Ok(task) => {
                let task_id = task.id;
                let _ = self.scheduler.enqueue_task(task);
                GatewayResponse::TaskAccepted { task_id }
            }
            Err(e) => GatewayResponse::Error { message: e.to_string() },
        }
    }

    fn run_self_evaluation(&self) -> GatewayResponse {
        self.submit_task(TaskSubmission {
            kind: TaskType::SelfEvaluation,
            priority: Priority::Low,
            title: "self-evaluation".to_string(),
            description: "gateway-requested self evaluation".to_string(),
            payload: warden_core::Value::Null,
        })
    }

    fn job_summaries(&self) -> GatewayResponse {
        let jobs = self.scheduler.jobs().iter().map(ScheduledJobSummary::from).collect();
        GatewayResponse::Jobs { jobs }
    }

    fn daemon_status(&self) -> GatewayResponse {
        GatewayResponse::DaemonStatus {
            uptime_ms: self.clock.epoch_ms().saturating_sub(self.boot_at_ms),
            queue_depth: self.scheduler.queue_depth(),
            heartbeat_tick: self.scheduler.heartbeat_tick(),
        }
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
