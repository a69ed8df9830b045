// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cryptographic audit ledger (C1, spec §4.1). Single-writer: `record`
//! takes the internal lock for the whole append so the sequence counter and
//! the persisted write can never race.

use std::sync::Arc;

use parking_lot::Mutex;
use warden_core::{AuditEntry, Clock, Value, GENESIS_HASH};
use warden_storage::Store;

use crate::error::EngineError;

/// Outcome of `verify_chain` (spec §4.1 `verifyChain`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyResult {
    pub valid: bool,
    pub broken_at: Option<u64>,
    pub total_entries: u64,
}

struct LedgerHead {
    last_hash: String,
    last_sequence: u64,
}

pub struct AuditLedger<C: Clock> {
    store: Arc<dyn Store>,
    clock: C,
    head: Mutex<LedgerHead>,
}

impl<C: Clock> AuditLedger<C> {
    /// Recovers the running head from whatever the store already holds
    /// (boot replay), so a freshly opened ledger continues the chain
    /// rather than restarting it.
    pub fn new(store: Arc<dyn Store>, clock: C) -> Self {
        let existing = store.audit_trail();
        let head = match existing.last() {
            Some(entry) => LedgerHead { last_hash: entry.hash.clone(), last_sequence: entry.sequence_number },
            None => LedgerHead { last_hash: GENESIS_HASH.to_string(), last_sequence: 0 },
        };
        Self { store, clock, head: Mutex::new(head) }
    }

    /// Appends a new entry (spec §4.1 `record`). Write failures are fatal
    /// to the caller — the action must not be considered recorded, so the
    /// head is only advanced after the store confirms the write.
    pub fn record(
        &self,
        actor: impl Into<String>,
        action: impl Into<String>,
        target: impl Into<String>,
        details: Value,
    ) -> Result<AuditEntry, EngineError> {
        let mut head = self.head.lock();
        let sequence_number = head.last_sequence + 1;
        let entry = AuditEntry::next(
            &head.last_hash,
            sequence_number,
            self.clock.epoch_ms(),
            actor,
            action,
            target,
            details,
        );
        self.store.append_audit(entry.clone())?;
        head.last_hash = entry.hash.clone();
        head.last_sequence = sequence_number;
        Ok(entry)
    }

    /// Replays every persisted row in ascending sequence, verifying the
    /// hash chain (spec §4.1 `verifyChain`).
    pub fn verify_chain(&self) -> VerifyResult {
        let mut entries = self.store.audit_trail();
        entries.sort_by_key(|e| e.sequence_number);

        let mut expected_previous = GENESIS_HASH.to_string();
        for entry in &entries {
            if entry.previous_hash != expected_previous || !entry.is_self_consistent() {
                return VerifyResult {
                    valid: false,
                    broken_at: Some(entry.sequence_number),
                    total_entries: entries.len() as u64,
                };
            }
            expected_previous = entry.hash.clone();
        }
        VerifyResult { valid: true, broken_at: None, total_entries: entries.len() as u64 }
    }

    /// Ascending-sequence entries, even though the fetch below is
    /// descending-then-reversed (spec §4.1 `getRecent`).
    pub fn get_recent(&self, n: usize) -> Vec<AuditEntry> {
        let mut entries = self.store.audit_trail();
        entries.sort_by_key(|e| std::cmp::Reverse(e.sequence_number));
        entries.truncate(n);
        entries.reverse();
        entries
    }

    pub fn get_by_actor(&self, actor: &str, n: usize) -> Vec<AuditEntry> {
        let mut entries: Vec<_> =
            self.store.audit_trail().into_iter().filter(|e| e.actor == actor).collect();
        entries.sort_by_key(|e| e.sequence_number);
        entries.truncate(n);
        entries
    }

    pub fn get_by_date_range(&self, start_ms: u64, end_ms: u64, n: usize) -> Vec<AuditEntry> {
        let mut entries: Vec<_> = self
            .store
            .audit_trail()
            .into_iter()
            .filter(|e| e.timestamp_ms >= start_ms && e.timestamp_ms <= end_ms)
            .collect();
        entries.sort_by_key(|e| e.sequence_number);
        entries.truncate(n);
        entries
    }

    pub fn count(&self) -> u64 {
        self.head.lock().last_sequence
    }
}

#[cfg(test)]
#[path = "ledger_tests.rs"]
mod tests;
