// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! warden-adapters: narrow trait interfaces to everything spec §1 declares
//! out of scope — concrete tools, the LLM backend, the vector memory layer,
//! and the gateway transport. No concrete collaborator is implemented here.

pub mod error;
pub mod gateway;
pub mod llm;
pub mod memory;
pub mod tool_handler;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use error::AdapterError;
pub use gateway::{GatewayTransport, NullGateway};
pub use llm::{DecodingParams, LlmBackend};
pub use memory::VectorMemory;
pub use tool_handler::{ExecutionContext, ToolHandler, UnimplementedToolHandler};
