// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! warden-wire: transport-independent message shapes for the gateway
//! collaborator (spec §6). The core never parses WebSocket/HTTP framing
//! itself — a gateway adapter decodes bytes into the DTOs here and calls
//! back into the daemon synchronously; outbound events reuse
//! `warden_core::Event` directly, since its `#[serde(tag = "type")]`
//! variants already carry the wire names spec §6 documents
//! (`task:created`, `daemon:heartbeat`, ...).

pub mod inbound;
pub mod ipc;
pub mod outbound;

pub use inbound::{GatewayCommand, InboundEvent, StateQuery, TaskSubmission};
pub use ipc::{read_message, socket_path, write_message, IpcError};
pub use outbound::{GatewayResponse, ScheduledJobSummary};
pub use warden_core::Event as OutboundEvent;
