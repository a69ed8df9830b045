// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Inter-handler message bus (C4, spec §4.4). Per-actor mailboxes guarded by
//! a single lock (spec §5 "shared-resource policy"); at-least-once directed
//! and broadcast delivery with TTL and acknowledgement.

use std::collections::{HashMap, HashSet};

use parking_lot::Mutex;
use warden_core::{BusMessage, BusMessageId, Clock, MessageKind, Value, BROADCAST_ACTOR};

use crate::error::EngineError;

/// Hard cap on the acknowledged-id set, truncated to its most recent half on
/// overflow (spec §4.4 "bound the acknowledged-id set").
pub const ACK_CAP: usize = 5_000;
const ACK_TRUNCATE_TO: usize = 2_500;

struct Mailboxes {
    by_actor: HashMap<String, Vec<BusMessage>>,
    acknowledged: HashSet<BusMessageId>,
    /// Preserves insertion order so truncation keeps the most recent half.
    acknowledged_order: Vec<BusMessageId>,
}

pub struct MessageBus<C: Clock> {
    clock: C,
    mailboxes: Mutex<Mailboxes>,
}

impl<C: Clock> MessageBus<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            mailboxes: Mutex::new(Mailboxes {
                by_actor: HashMap::new(),
                acknowledged: HashSet::new(),
                acknowledged_order: Vec::new(),
            }),
        }
    }

    pub fn register_actor(&self, name: &str) {
        self.mailboxes.lock().by_actor.entry(name.to_string()).or_default();
    }

    /// Enqueues into `to`'s mailbox (spec §4.4 `send`).
    pub fn send(&self, from: &str, to: &str, payload: Value, ttl_ms: u64) -> BusMessage {
        let message = BusMessage {
            id: BusMessageId::new(),
            from_actor: from.to_string(),
            to_actor: to.to_string(),
            kind: MessageKind::Request,
            payload,
            timestamp_ms: self.clock.epoch_ms(),
            ttl_ms,
            in_reply_to: None,
        };
        self.deliver(message.clone());
        message
    }

    /// Finds the referenced message, replies to its original sender
    /// annotated with `inReplyTo`, and acknowledges the original (spec §4.4
    /// `respond`).
    pub fn respond(
        &self,
        original_id: BusMessageId,
        from: &str,
        payload: Value,
        ttl_ms: u64,
    ) -> Result<BusMessage, EngineError> {
        let original = self
            .find(original_id)
            .ok_or_else(|| EngineError::UnknownMessage(original_id.to_string()))?;

        let reply = BusMessage {
            id: BusMessageId::new(),
            from_actor: from.to_string(),
            to_actor: original.from_actor.clone(),
            kind: MessageKind::Response,
            payload,
            timestamp_ms: self.clock.epoch_ms(),
            ttl_ms,
            in_reply_to: Some(original_id),
        };
        self.deliver(reply.clone());
        self.acknowledge(original_id);
        Ok(reply)
    }

    /// Enqueues into every known mailbox except the sender's (spec §4.4
    /// `broadcast`). Delivery order across recipients is not guaranteed
    /// (spec §5).
    pub fn broadcast(&self, from: &str, payload: Value, ttl_ms: u64) -> BusMessage {
        let message = BusMessage {
            id: BusMessageId::new(),
            from_actor: from.to_string(),
            to_actor: BROADCAST_ACTOR.to_string(),
            kind: MessageKind::Broadcast,
            payload,
            timestamp_ms: self.clock.epoch_ms(),
            ttl_ms,
            in_reply_to: None,
        };
        let mut mailboxes = self.mailboxes.lock();
        let recipients: Vec<String> =
            mailboxes.by_actor.keys().filter(|actor| actor.as_str() != from).cloned().collect();
        for actor in recipients {
            mailboxes.by_actor.entry(actor).or_default().push(message.clone());
        }
        message
    }

    /// Non-destructive peek, filtered by unacknowledged and unexpired
    /// (spec §4.4 `receive`).
    pub fn receive(&self, actor: &str, limit: usize) -> Vec<BusMessage> {
        let now = self.clock.epoch_ms();
        let mailboxes = self.mailboxes.lock();
        mailboxes
            .by_actor
            .get(actor)
            .into_iter()
            .flatten()
            .filter(|m| !mailboxes.acknowledged.contains(&m.id) && !m.is_expired(now))
            .take(limit)
            .cloned()
            .collect()
    }

    /// Peek then acknowledge all returned (spec §4.4 `consume`).
    pub fn consume(&self, actor: &str, limit: usize) -> Vec<BusMessage> {
        let messages = self.receive(actor, limit);
        for message in &messages {
            self.acknowledge(message.id);
        }
        messages
    }

    pub fn acknowledge(&self, id: BusMessageId) {
        let mut mailboxes = self.mailboxes.lock();
        if mailboxes.acknowledged.insert(id) {
            mailboxes.acknowledged_order.push(id);
            if mailboxes.acknowledged_order.len() > ACK_CAP {
                let drop_to = mailboxes.acknowledged_order.len() - ACK_TRUNCATE_TO;
                for stale in mailboxes.acknowledged_order.drain(..drop_to) {
                    mailboxes.acknowledged.remove(&stale);
                }
            }
        }
    }

    /// Unacknowledged count (spec §4.4 `getQueueDepth`).
    pub fn get_queue_depth(&self, actor: &str) -> usize {
        let mailboxes = self.mailboxes.lock();
        mailboxes
            .by_actor
            .get(actor)
            .map(|messages| {
                messages.iter().filter(|m| !mailboxes.acknowledged.contains(&m.id)).count()
            })
            .unwrap_or(0)
    }

    /// Background maintenance: drop expired messages, returning the ids
    /// dropped so the caller can emit one expiration event per drop
    /// (spec §4.4 "every 60s").
    pub fn sweep_expired(&self) -> Vec<BusMessageId> {
        let now = self.clock.epoch_ms();
        let mut mailboxes = self.mailboxes.lock();
        let mut dropped = Vec::new();
        for messages in mailboxes.by_actor.values_mut() {
            messages.retain(|m| {
                if m.is_expired(now) {
                    dropped.push(m.id);
                    false
                } else {
                    true
                }
            });
        }
        dropped
    }

    fn deliver(&self, message: BusMessage) {
        self.mailboxes.lock().by_actor.entry(message.to_actor.clone()).or_default().push(message);
    }

    fn find(&self, id: BusMessageId) -> Option<BusMessage> {
        self.mailboxes.lock().by_actor.values().flatten().find(|m| m.id == id).cloned()
    }
}

#[cfg(test)]
#[path = "bus_tests.rs"]
mod tests;
