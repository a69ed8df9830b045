// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use warden_core::AgentRole;

use super::*;

#[tokio::test]
async fn unimplemented_tool_handler_fails_clearly() {
    let handler = UnimplementedToolHandler::new("send_message");
    let ctx = ExecutionContext { actor: "test".to_string(), role: AgentRole::Messaging, deadline_ms: 0 };
    let result = handler.execute(Value::Null, &ctx).await.unwrap();
    assert!(!result.success);
    assert_eq!(handler.name(), "send_message");
    assert!(result.error.unwrap().contains("no concrete collaborator"));
}
