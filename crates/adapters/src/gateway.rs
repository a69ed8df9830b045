// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The narrow interface to the external gateway transport (WebSocket/HTTP,
//! out of scope per spec §1 and §6): the core only needs to publish events
//! and does not parse the wire protocol itself.

use async_trait::async_trait;
use warden_core::Event;

use crate::error::AdapterError;

#[async_trait]
pub trait GatewayTransport: Send + Sync {
    async fn publish(&self, event: Event) -> Result<(), AdapterError>;
}

/// A transport that drops every event, for boot configurations that run
/// without a gateway attached.
#[derive(Debug, Default)]
pub struct NullGateway;

#[async_trait]
impl GatewayTransport for NullGateway {
    async fn publish(&self, _event: Event) -> Result<(), AdapterError> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "gateway_tests.rs"]
mod tests;
