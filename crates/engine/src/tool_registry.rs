// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tool registry and execution wrapper (C7, spec §4.7). Every invocation
//! runs the same six-step protocol: validate, consult governance, check
//! the breaker, execute, observe the breaker, audit.

use std::collections::HashMap;
use std::sync::Arc;

use warden_adapters::{AdapterError, ExecutionContext, ToolHandler};
use warden_core::{Authority, Clock, ToolDescriptor, ToolResult, Value};

use crate::breaker::CircuitBreakerRegistry;
use crate::error::EngineError;
use crate::governance::GovernanceEngine;
use crate::ledger::AuditLedger;

/// Outcome of an invocation attempt. Governance-blocked and breaker-open
/// are modeled outcomes, not errors (spec §7): a blocked-by-policy
/// invocation is an expected, deterministic result.
#[derive(Debug, Clone)]
pub enum ToolOutcome {
    Executed(ToolResult),
    PendingAuthorization { authority: Authority, reason: String },
    BreakerOpen,
}

impl ToolOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ToolOutcome::Executed(r) if r.success)
    }
}

struct Registration {
    descriptor: ToolDescriptor,
    handler: Arc<dyn ToolHandler>,
}

pub struct ToolRegistry<C: Clock> {
    clock: C,
    tools: HashMap<&'static str, Registration>,
    governance: Arc<GovernanceEngine<C>>,
    breakers: Arc<CircuitBreakerRegistry<C>>,
    ledger: Arc<AuditLedger<C>>,
}

impl<C: Clock> ToolRegistry<C> {
    pub fn new(
        clock: C,
        governance: Arc<GovernanceEngine<C>>,
        breakers: Arc<CircuitBreakerRegistry<C>>,
        ledger: Arc<AuditLedger<C>>,
    ) -> Self {
        Self { clock, tools: HashMap::new(), governance, breakers, ledger }
    }

    /// Registers a tool by unique name (spec §4.7: "the same name must not
    /// be registered twice").
    pub fn register(
        &mut self,
        descriptor: ToolDescriptor,
        handler: Arc<dyn ToolHandler>,
    ) -> Result<(), EngineError> {
        if self.tools.contains_key(descriptor.name) {
            return Err(EngineError::DuplicateTool(descriptor.name));
        }
        self.tools.insert(descriptor.name, Registration { descriptor, handler });
        Ok(())
    }

    pub fn descriptor(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.get(name).map(|r| &r.descriptor)
    }

    /// Runs the six-step invocation protocol (spec §4.7).
    pub async fn invoke(
        &self,
        name: &str,
        input: Value,
        ctx: &ExecutionContext,
        estimated_value: Option<f64>,
    ) -> Result<ToolOutcome, EngineError> {
        let registration =
            self.tools.get(name).ok_or_else(|| EngineError::UnknownTool(name.to_string()))?;
        let descriptor = &registration.descriptor;

        // 1. Schema validation — never retried.
        if let Err(reason) = descriptor.input_schema.validate(&input) {
            return Ok(ToolOutcome::Executed(ToolResult::err(format!("invalid input: {reason}"))));
        }

        // 2. Governance consultation — deferred execution is a value, not a
        // silent failure.
        let authority = self.governance.decide(descriptor, estimated_value);
        if !authority.allows_auto_execute() {
            self.audit_blocked(descriptor.name, ctx, &input, authority);
            return Ok(ToolOutcome::PendingAuthorization {
                authority,
                reason: format!("authority {authority} requires out-of-band approval"),
            });
        }

        // 3. Breaker check — never invoked while open.
        if !self.breakers.can_execute(descriptor.name) {
            return Ok(ToolOutcome::BreakerOpen);
        }

        // 4. Execute, converting adapter exceptions into a failure value.
        let result = match registration.handler.execute(input.clone(), ctx).await {
            Ok(result) => result,
            Err(AdapterError::Timeout(ms)) => ToolResult::err(format!("timed out after {ms}ms")),
            Err(other) => ToolResult::err(other.to_string()),
        };

        // 5. Breaker observation.
        if result.success {
            self.breakers.record_success(descriptor.name);
        } else {
            self.breakers.record_failure(descriptor.name);
        }

        // 6. Audit if governance requires it for this risk level.
        let policy = self.governance.policy_for(descriptor.risk_level);
        if policy.audit_required {
            self.audit_completed(descriptor.name, ctx, &input, result.success);
        }

        Ok(ToolOutcome::Executed(result))
    }

    fn audit_blocked(&self, tool_name: &str, ctx: &ExecutionContext, input: &Value, authority: Authority) {
        let target = resolve_target(tool_name, input);
        let details = redacted_summary(input, false, Some(authority));
        let _ = self.ledger.record(ctx.actor.clone(), tool_name, target, details);
    }

    fn audit_completed(&self, tool_name: &str, ctx: &ExecutionContext, input: &Value, success: bool) {
        let target = resolve_target(tool_name, input);
        let details = redacted_summary(input, success, None);
        let _ = self.ledger.record(ctx.actor.clone(), tool_name, target, details);
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

/// Resolves the audit `target` field from an explicit `target` input key,
/// falling back to the tool's own name (spec §4.7 "target=resolved target
/// field").
fn resolve_target(tool_name: &str, input: &Value) -> String {
    input
        .as_map()
        .and_then(|m| m.get("target"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| tool_name.to_string())
}

/// A redacted summary of the input: field names only, never values, plus
/// the success flag (spec §4.7 "redacted input summary + success flag").
fn redacted_summary(input: &Value, success: bool, blocked_authority: Option<Authority>) -> Value {
    let mut details = std::collections::BTreeMap::new();
    let fields: Vec<Value> = input
        .as_map()
        .map(|m| m.keys().map(|k| Value::String(k.clone())).collect())
        .unwrap_or_default();
    details.insert("input_fields".to_string(), Value::Array(fields));
    details.insert("success".to_string(), Value::Bool(success));
    if let Some(authority) = blocked_authority {
        details.insert("blocked".to_string(), Value::Bool(true));
        details.insert("authority".to_string(), Value::String(authority.to_string()));
    }
    Value::Map(details)
}

#[cfg(test)]
#[path = "tool_registry_tests.rs"]
mod tests;
