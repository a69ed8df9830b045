// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn ctx() -> ExecutionContext {
    ExecutionContext { actor: "a1".into(), role: warden_core::AgentRole::Research, deadline_ms: 0 }
}

#[tokio::test]
async fn fake_tool_handler_records_calls_and_returns_configured_result() {
    let handler = FakeToolHandler::new("search", ToolResult::ok(Value::Null));
    let result = handler.execute(Value::Null, &ctx()).await.unwrap();
    assert!(result.success);
    assert_eq!(handler.call_count(), 1);
}

#[tokio::test]
async fn fake_tool_handler_can_be_configured_to_fail() {
    let handler = FakeToolHandler::failing("search", "boom");
    let err = handler.execute(Value::Null, &ctx()).await.unwrap_err();
    assert!(matches!(err, AdapterError::Failed(_)));
}
