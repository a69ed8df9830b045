// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The narrow interface between the core's Execution Wrapper (C7) and a
//! concrete tool implementation. Individual tools (payment processors,
//! messaging providers, market-data, browser automation, OCR, ...) are out
//! of scope (spec §1) and implement this trait in their own crate.

use async_trait::async_trait;
use warden_core::{AgentRole, ToolResult, Value};

use crate::error::AdapterError;

/// Context handed to a tool at invocation time. Carries only what the
/// redesign note in spec §9 calls for: a deadline and the calling role's
/// identity, not a god-object.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    pub actor: String,
    pub role: AgentRole,
    pub deadline_ms: u64,
}

#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Unique tool name, matching the owning `ToolDescriptor::name`.
    fn name(&self) -> &'static str;

    async fn execute(&self, input: Value, ctx: &ExecutionContext) -> Result<ToolResult, AdapterError>;
}

/// A registered tool with no concrete collaborator implemented yet. Returns
/// a clear failure instead of a silent success, so governance and breaker
/// bookkeeping for the tool still reflect reality.
pub struct UnimplementedToolHandler {
    name: &'static str,
}

impl UnimplementedToolHandler {
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }
}

#[async_trait]
impl ToolHandler for UnimplementedToolHandler {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn execute(&self, _input: Value, _ctx: &ExecutionContext) -> Result<ToolResult, AdapterError> {
        Ok(ToolResult::err(format!("{} has no concrete collaborator wired in this daemon", self.name)))
    }
}

#[cfg(test)]
#[path = "tool_handler_tests.rs"]
mod tests;
