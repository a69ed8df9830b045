// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tool descriptor and result types (spec §3 `Tool`/`ToolResult`, §9 dynamic
//! payload redesign note).

use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

crate::simple_display! {
    RiskLevel {
        Low => "low",
        Medium => "medium",
        High => "high",
        Critical => "critical",
    }
}

/// A minimal JSON-Schema-shaped input descriptor: the set of required field
/// names and their expected `Value` discriminant. Enough to reject malformed
/// input without generic reflection (spec §9).
#[derive(Debug, Clone, Default)]
pub struct InputSchema {
    pub required_fields: Vec<&'static str>,
}

impl InputSchema {
    pub fn validate(&self, input: &Value) -> Result<(), String> {
        let map = input.as_map().ok_or_else(|| "input must be a map".to_string())?;
        for field in &self.required_fields {
            if !map.contains_key(*field) {
                return Err(format!("missing required field: {}", field));
            }
        }
        Ok(())
    }
}

/// Static registration record for a tool (spec §3 `Tool`). The executable
/// behavior lives behind `warden-adapters`' `ToolHandler` trait; this struct
/// is the registry's bookkeeping record.
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub input_schema: InputSchema,
    pub requires_approval: bool,
    pub risk_level: RiskLevel,
}

/// Outcome of a tool invocation (spec §3 `ToolResult`).
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ToolResult {
    pub success: bool,
    pub data: Option<Value>,
    pub error: Option<String>,
    pub metadata: Option<Value>,
}

impl ToolResult {
    pub fn ok(data: Value) -> Self {
        Self { success: true, data: Some(data), error: None, metadata: None }
    }

    pub fn err(error: impl Into<String>) -> Self {
        Self { success: false, data: None, error: Some(error.into()), metadata: None }
    }
}

#[cfg(test)]
#[path = "tool_tests.rs"]
mod tests;
