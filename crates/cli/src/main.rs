// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `warden`: local command-line client for a running `wardend`, talking
//! to it over the control socket (spec §4.13).

mod client;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use warden_core::{Priority, ScheduledJobId, TaskType, Value};

use client::DaemonClient;
use output::{format_or_json, OutputFormat};

#[derive(Parser)]
#[command(name = "warden", version, about = "Control a running wardend")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Command {
    /// Submit a new task to the queue
    Submit {
        /// Kind of task to run
        #[arg(long, value_enum, default_value = "system")]
        kind: CliTaskType,
        /// Scheduling priority
        #[arg(long, value_enum, default_value = "medium")]
        priority: CliPriority,
        /// Short title for the task
        title: String,
        /// Longer description
        #[arg(long, default_value = "")]
        description: String,
        /// Task payload as a JSON literal
        #[arg(long)]
        payload: Option<String>,
    },
    /// List scheduled jobs
    Jobs,
    /// Enable or disable a scheduled job
    JobToggle {
        /// Job ID, as printed by `warden jobs`
        id: String,
        /// Enable the job instead of disabling it
        #[arg(long)]
        enable: bool,
    },
    /// Queue a self-evaluation task
    SelfEval,
    /// Print the number of entries in the memory store
    MemoryStats,
    /// Print daemon uptime, queue depth, and heartbeat tick
    Status,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliTaskType {
    MessagingInbound,
    ToolInvocation,
    SelfEvaluation,
    MemoryConsolidation,
    HealthCheck,
    BreakerEvaluation,
    DependencyAudit,
    Introspection,
    System,
}

impl From<CliTaskType> for TaskType {
    fn from(kind: CliTaskType) -> Self {
        match kind {
            CliTaskType::MessagingInbound => TaskType::MessagingInbound,
            CliTaskType::ToolInvocation => TaskType::ToolInvocation,
            CliTaskType::SelfEvaluation => TaskType::SelfEvaluation,
            CliTaskType::MemoryConsolidation => TaskType::MemoryConsolidation,
            CliTaskType::HealthCheck => TaskType::HealthCheck,
            CliTaskType::BreakerEvaluation => TaskType::BreakerEvaluation,
            CliTaskType::DependencyAudit => TaskType::DependencyAudit,
            CliTaskType::Introspection => TaskType::Introspection,
            CliTaskType::System => TaskType::System,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliPriority {
    Critical,
    High,
    Medium,
    Low,
}

impl From<CliPriority> for Priority {
    fn from(priority: CliPriority) -> Self {
        match priority {
            CliPriority::Critical => Priority::Critical,
            CliPriority::High => Priority::High,
            CliPriority::Medium => Priority::Medium,
            CliPriority::Low => Priority::Low,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = DaemonClient::new(client::state_dir());

    match cli.command {
        Command::Submit { kind, priority, title, description, payload } => {
            let payload = match payload {
                Some(raw) => {
                    let json: serde_json::Value =
                        serde_json::from_str(&raw).context("payload must be valid JSON")?;
                    Value::from(json)
                }
                None => Value::Null,
            };
            let task_id = client
                .submit_task(kind.into(), priority.into(), title, description, payload)
                .await?;
            format_or_json(cli.format, &task_id.to_string(), || {
                println!("submitted {task_id}");
            })?;
        }
        Command::Jobs => {
            let jobs = client.list_jobs().await?;
            format_or_json(cli.format, &jobs, || {
                if jobs.is_empty() {
                    println!("No scheduled jobs");
                }
                for job in &jobs {
                    let state = if job.enabled { "enabled" } else { "disabled" };
                    println!(
                        "{:<44} {:<24} {:<9} every {}ms  next in {}ms",
                        job.id, job.name, state, job.interval_ms, job.next_run_ms
                    );
                }
            })?;
        }
        Command::JobToggle { id, enable } => {
            let (_prefix, uuid) =
                id.split_once(':').ok_or_else(|| anyhow::anyhow!("invalid job id: {id}"))?;
            let job_id = ScheduledJobId::parse(uuid).context("invalid job id")?;
            client.toggle_job(job_id, enable).await?;
            println!("{} job {}", if enable { "enabled" } else { "disabled" }, id);
        }
        Command::SelfEval => {
            let task_id = client.run_self_evaluation().await?;
            format_or_json(cli.format, &task_id.to_string(), || {
                println!("queued self-evaluation as {task_id}");
            })?;
        }
        Command::MemoryStats => {
            let count = client.memory_stats().await?;
            format_or_json(cli.format, &count, || {
                println!("{count} memory entries");
            })?;
        }
        Command::Status => {
            let (uptime_ms, queue_depth, heartbeat_tick) = client.status().await?;
            let obj = serde_json::json!({
                "uptime_ms": uptime_ms,
                "queue_depth": queue_depth,
                "heartbeat_tick": heartbeat_tick,
            });
            format_or_json(cli.format, &obj, || {
                println!("uptime: {uptime_ms}ms");
                println!("queue depth: {queue_depth}");
                println!("heartbeat tick: {heartbeat_tick}");
            })?;
        }
    }

    Ok(())
}
