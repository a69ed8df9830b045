// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Inter-handler message bus value types (spec §3, §4.4).

use crate::value::Value;

crate::define_id! {
    /// Opaque bus message identifier.
    pub struct BusMessageId("msg");
}

/// Wildcard recipient meaning "every known mailbox" (spec §4.4 `broadcast`).
pub const BROADCAST_ACTOR: &str = "*";

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Request,
    Response,
    Broadcast,
}

crate::simple_display! {
    MessageKind {
        Request => "request",
        Response => "response",
        Broadcast => "broadcast",
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BusMessage {
    pub id: BusMessageId,
    pub from_actor: String,
    pub to_actor: String,
    pub kind: MessageKind,
    pub payload: Value,
    pub timestamp_ms: u64,
    pub ttl_ms: u64,
    /// Set on replies built by `respond` (spec §4.4 "annotated with
    /// `inReplyTo`").
    pub in_reply_to: Option<BusMessageId>,
}

impl BusMessage {
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.timestamp_ms) >= self.ttl_ms
    }
}

#[cfg(test)]
#[path = "bus_tests.rs"]
mod tests;
