// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process-local event bus (C11, spec §4.11). Subsystems are handed an
//! [`EventEmitter`] handle, never the scheduler or orchestrator object
//! itself (spec §9 "avoid event-emission coupling to the scheduler"); the
//! gateway adapter and any in-process listener subscribe independently.

use tokio::sync::broadcast;
use warden_core::Event;

/// Bounded so a slow or absent subscriber can never cause unbounded
/// growth; a subscriber that falls this far behind misses the oldest
/// events rather than stalling every emitter (spec §5 "never block the
/// emitting subsystem").
const CHANNEL_CAPACITY: usize = 4096;

#[derive(Clone)]
pub struct EventEmitter {
    tx: broadcast::Sender<Event>,
}

pub struct EventSubscriber {
    rx: broadcast::Receiver<Event>,
}

impl EventEmitter {
    /// Constructs the bus and its first subscriber. Further subscribers
    /// are created with [`EventEmitter::subscribe`].
    pub fn new() -> (Self, EventSubscriber) {
        let (tx, rx) = broadcast::channel(CHANNEL_CAPACITY);
        (Self { tx }, EventSubscriber { rx })
    }

    pub fn subscribe(&self) -> EventSubscriber {
        EventSubscriber { rx: self.tx.subscribe() }
    }

    /// Emits to every current subscriber. A channel with no subscribers
    /// left is not an error — events are fire-and-forget broadcasts (spec
    /// §4.11 "best-effort delivery").
    pub fn emit(&self, event: Event) {
        let _ = self.tx.send(event);
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl EventSubscriber {
    /// Waits for the next event. Returns `None` once every emitter handle
    /// has been dropped; a lagged subscriber resumes from the next event
    /// rather than erroring out (spec §4.11 "a slow subscriber may miss
    /// events; it never blocks the emitter").
    pub async fn recv(&mut self) -> Option<Event> {
        loop {
            match self.rx.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

#[cfg(test)]
#[path = "event_bus_tests.rs"]
mod tests;
