// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scheduler (C9, spec §4.9): a priority queue drained by either a single
//! writer or a bounded worker pool, plus the default recurring jobs and
//! the heartbeat tick. The queue itself lives only in memory — every task
//! it holds is also persisted through the [`Store`] as soon as it's
//! enqueued, so a crash loses no task, only its place in line.

use std::collections::{BinaryHeap, HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::oneshot;
use tracing::warn;
use warden_core::{Clock, Event, Priority, ScheduledJob, ScheduledJobId, Task, TaskId, TaskResult, DEFAULT_JOBS};
use warden_storage::Store;

use crate::event_bus::EventEmitter;
use crate::orchestrator::Orchestrator;

/// Explicit worker concurrency (spec §9 open question, resolved in
/// SPEC_FULL §5). `Single` preserves total pop order exactly; `Pool`
/// preserves priority-tier ordering only, not intra-tier FIFO, since
/// several tasks from the same tier may run concurrently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerMode {
    Single,
    Pool(usize),
}

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(10);
const TICKS_PER_HEARTBEAT: u64 = 6;

struct QueueEntry {
    priority: Priority,
    seq: u64,
    task: Task,
    source_job: Option<ScheduledJobId>,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.seq == other.seq
    }
}
impl Eq for QueueEntry {}
impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for QueueEntry {
    /// `BinaryHeap` is a max-heap; `pop()` must return the most urgent
    /// entry (lowest `Priority` ordinal, earliest `seq`), so comparison
    /// here is the reverse of the natural tuple order (spec §4.9: "stable
    /// ... FIFO at equal priority").
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other.priority.cmp(&self.priority).then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Default)]
struct SchedulerState {
    queue: BinaryHeap<QueueEntry>,
    pending_results: HashMap<TaskId, oneshot::Sender<TaskResult>>,
    jobs: HashMap<ScheduledJobId, ScheduledJob>,
    running_jobs: HashSet<ScheduledJobId>,
}

pub struct Scheduler<C: Clock> {
    clock: C,
    store: Arc<dyn Store>,
    orchestrator: Arc<Orchestrator<C>>,
    events: EventEmitter,
    worker_mode: WorkerMode,
    next_seq: AtomicU64,
    tick: AtomicU64,
    draining: tokio::sync::Mutex<()>,
    started: AtomicBool,
    self_weak: Weak<Scheduler<C>>,
    state: Mutex<SchedulerState>,
}

impl<C: Clock + 'static> Scheduler<C> {
    pub fn new(
        clock: C,
        store: Arc<dyn Store>,
        orchestrator: Arc<Orchestrator<C>>,
        events: EventEmitter,
        worker_mode: WorkerMode,
    ) -> Arc<Self> {
        Arc::new_cyclic(|weak| Self {
            clock,
            store,
            orchestrator,
            events,
            worker_mode,
            next_seq: AtomicU64::new(0),
            tick: AtomicU64::new(0),
            draining: tokio::sync::Mutex::new(()),
            started: AtomicBool::new(false),
            self_weak: weak.clone(),
            state: Mutex::new(SchedulerState::default()),
        })
    }

    /// Registers the default scheduled jobs (spec §4.9), each enabled and
    /// due one interval from now.
    pub fn install_default_jobs(&self) {
        let now = self.clock.epoch_ms();
        for (name, task_type, interval_ms) in DEFAULT_JOBS {
            self.add_job(ScheduledJob::new(*name, *task_type, Priority::Low, *interval_ms, now));
        }
    }

    pub fn add_job(&self, job: ScheduledJob) -> ScheduledJobId {
        let id = job.id;
        let _ = self.store.upsert_scheduled_job(job.clone());
        self.state.lock().jobs.insert(id, job);
        id
    }

    pub fn toggle_job(&self, id: ScheduledJobId, enabled: bool) {
        let mut state = self.state.lock();
        if let Some(job) = state.jobs.get_mut(&id) {
            job.enabled = enabled;
            let _ = self.store.upsert_scheduled_job(job.clone());
        }
    }

    pub fn jobs(&self) -> Vec<ScheduledJob> {
        self.state.lock().jobs.values().cloned().collect()
    }

    /// Runs a job immediately regardless of its schedule (spec §4.9
    /// `runJob`), subject to the same non-overlap rule as a timer fire.
    pub fn run_job(&self, id: ScheduledJobId) {
        let job = self.state.lock().jobs.get(&id).cloned();
        if let Some(job) = job {
            self.fire_job(job);
        }
    }

    fn fire_job(&self, mut job: ScheduledJob) {
        {
            let mut state = self.state.lock();
            if !state.running_jobs.insert(job.id) {
                warn!(job = %job.name, "job still running from previous fire, skipping this one");
                return;
            }
        }

        job.record_run(self.clock.epoch_ms());
        let _ = self.store.upsert_scheduled_job(job.clone());
        self.state.lock().jobs.insert(job.id, job.clone());

        let task = Task::new(
            job.task_type,
            job.priority,
            job.name.clone(),
            format!("scheduled job {}", job.name),
            job.payload.clone(),
            self.clock.epoch_ms(),
        );
        self.enqueue_internal(task, None, Some(job.id));
    }

    fn mark_job_finished(&self, id: ScheduledJobId) {
        self.state.lock().running_jobs.remove(&id);
    }

    /// Appends a task and triggers processing, returning a future resolved
    /// with its result once the orchestrator finishes executing it (spec
    /// §4.9 `enqueueTask`).
    pub fn enqueue_task(&self, task: Task) -> oneshot::Receiver<TaskResult> {
        let (tx, rx) = oneshot::channel();
        self.enqueue_internal(task, Some(tx), None);
        rx
    }

    fn enqueue_internal(
        &self,
        task: Task,
        result_tx: Option<oneshot::Sender<TaskResult>>,
        source_job: Option<ScheduledJobId>,
    ) {
        let _ = self.store.upsert_task(task.clone());
        self.events.emit(Event::task_created(&task));
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        {
            let mut state = self.state.lock();
            if let Some(tx) = result_tx {
                state.pending_results.insert(task.id, tx);
            }
            state.queue.push(QueueEntry { priority: task.priority, seq, task, source_job });
        }
        self.trigger_processing();
    }

    /// Fire-and-forget kick of the drainer; safe to call from anywhere
    /// (spec §4.9 `processQueue` re-entrancy — multiple triggers coalesce
    /// into whichever drain loop is currently running, or start one).
    fn trigger_processing(&self) {
        let Some(strong) = self.self_weak.upgrade() else { return };
        tokio::spawn(async move {
            strong.process_queue().await;
        });
    }

    /// Drains the queue until empty or no enqueued task is ready (an
    /// unfinished dependency blocks it). Re-entrant-safe: a second caller
    /// arriving while a drain is already running returns immediately
    /// rather than draining twice (spec §4.9 "single-writer re-entrant
    /// safe").
    pub async fn process_queue(self: Arc<Self>) {
        let Ok(_permit) = self.draining.try_lock() else { return };
        loop {
            let completed: HashSet<TaskId> =
                self.store.tasks().into_iter().filter(|t| t.is_terminal()).map(|t| t.id).collect();

            let Some(first) = self.pop_ready(&completed) else { break };
            match self.worker_mode {
                WorkerMode::Single => self.run_one(first).await,
                WorkerMode::Pool(n) => {
                    let mut batch = vec![first];
                    while batch.len() < n.max(1) {
                        match self.pop_ready(&completed) {
                            Some(entry) => batch.push(entry),
                            None => break,
                        }
                    }
                    let handles: Vec<_> = batch
                        .into_iter()
                        .map(|entry| {
                            let this = Arc::clone(&self);
                            tokio::spawn(async move { this.run_one(entry).await })
                        })
                        .collect();
                    for handle in handles {
                        let _ = handle.await;
                    }
                }
            }
        }
    }

    /// Scans the heap in priority order for the first task whose
    /// dependencies are all complete, restoring the rest (spec §3: a task
    /// is "popped ... when no unfinished dependency", which a plain
    /// priority pop cannot express on its own).
    fn pop_ready(&self, completed: &HashSet<TaskId>) -> Option<QueueEntry> {
        let mut state = self.state.lock();
        let mut deferred = Vec::new();
        let mut found = None;
        while let Some(entry) = state.queue.pop() {
            if entry.task.is_ready(completed) {
                found = Some(entry);
                break;
            }
            deferred.push(entry);
        }
        for entry in deferred {
            state.queue.push(entry);
        }
        found
    }

    async fn run_one(&self, entry: QueueEntry) {
        let QueueEntry { task, source_job, .. } = entry;
        let task_id = task.id;
        let result = self.orchestrator.execute_task(task).await;
        if let Some(job_id) = source_job {
            self.mark_job_finished(job_id);
        }
        if let Some(tx) = self.state.lock().pending_results.remove(&task_id) {
            let _ = tx.send(result);
        }
    }

    /// Fires any due jobs and advances the heartbeat counter, emitting
    /// `daemon:heartbeat` every sixth tick (spec §4.9: "~10s tick, ~60s
    /// heartbeat").
    pub fn tick(&self) {
        let now = self.clock.epoch_ms();
        let due: Vec<ScheduledJob> =
            self.state.lock().jobs.values().filter(|job| job.is_due(now)).cloned().collect();
        for job in due {
            self.fire_job(job);
        }

        let ticks = self.tick.fetch_add(1, Ordering::Relaxed) + 1;
        if ticks % TICKS_PER_HEARTBEAT == 0 {
            self.events.emit(Event::DaemonHeartbeat { tick: ticks });
        }
    }

    /// Starts the drainer and the heartbeat/job timer loop. Idempotent:
    /// calling twice while already running is a no-op.
    pub fn start(self: &Arc<Self>) {
        if self.started.swap(true, Ordering::AcqRel) {
            return;
        }
        self.events.emit(Event::DaemonStarted);
        self.trigger_processing();

        let this = Arc::clone(self);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(HEARTBEAT_INTERVAL);
            loop {
                interval.tick().await;
                if !this.started.load(Ordering::Acquire) {
                    break;
                }
                this.tick();
                this.trigger_processing();
            }
        });
    }

    /// Stops the timer loop. Idempotent; already-running drains finish
    /// their current batch.
    pub fn stop(&self) {
        if !self.started.swap(false, Ordering::AcqRel) {
            return;
        }
        self.events.emit(Event::DaemonStopped);
    }

    pub fn queue_depth(&self) -> usize {
        self.state.lock().queue.len()
    }

    pub fn heartbeat_tick(&self) -> u64 {
        self.tick.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
