// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake collaborator implementations for other crates' tests, gated behind
//! the `test-support` feature.

use async_trait::async_trait;
use parking_lot::Mutex;
use warden_core::{ToolResult, Value};

use crate::error::AdapterError;
use crate::tool_handler::{ExecutionContext, ToolHandler};

/// A tool handler that records every call and returns a fixed result,
/// optionally failing on command.
pub struct FakeToolHandler {
    name: &'static str,
    result: Mutex<Result<ToolResult, String>>,
    calls: Mutex<Vec<Value>>,
}

impl FakeToolHandler {
    pub fn new(name: &'static str, result: ToolResult) -> Self {
        Self { name, result: Mutex::new(Ok(result)), calls: Mutex::new(Vec::new()) }
    }

    pub fn failing(name: &'static str, error: impl Into<String>) -> Self {
        Self { name, result: Mutex::new(Err(error.into())), calls: Mutex::new(Vec::new()) }
    }

    pub fn set_result(&self, result: Result<ToolResult, String>) {
        *self.result.lock() = result;
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl ToolHandler for FakeToolHandler {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn execute(&self, input: Value, _ctx: &ExecutionContext) -> Result<ToolResult, AdapterError> {
        self.calls.lock().push(input);
        match &*self.result.lock() {
            Ok(result) => Ok(result.clone()),
            Err(message) => Err(AdapterError::Failed(message.clone())),
        }
    }
}

#[cfg(test)]
#[path = "test_support_tests.rs"]
mod tests;
