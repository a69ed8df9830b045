// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Audit ledger entry type and its hash-chain construction (spec §3, §4.1).
//! Grounded in the hash-chained `AuditEvent` pattern common to ledger
//! implementations in the wider ecosystem: each entry's hash folds in the
//! previous entry's hash, so any retroactive edit is detectable by replay.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::value::Value;

/// The genesis previous-hash value: sixty-four ASCII zeros (spec §3).
pub const GENESIS_HASH: &str = "0000000000000000000000000000000000000000000000000000000000000000";

const _: () = assert!(GENESIS_HASH.len() == 64);

/// Strictly monotone, gapless sequence number starting at 1.
pub type SequenceNumber = u64;

/// One row of the append-only audit trail (spec §3 `AuditEntry`).
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AuditEntry {
    pub id: uuid::Uuid,
    pub sequence_number: SequenceNumber,
    pub timestamp_ms: u64,
    pub actor: String,
    pub action: String,
    pub target: String,
    pub details: Value,
    pub previous_hash: String,
    pub hash: String,
}

/// Render an epoch-millisecond timestamp as ISO-8601 UTC, matching the
/// format folded into the hash (spec §3: "ISO-8601-timestamp").
pub fn iso8601(timestamp_ms: u64) -> String {
    let secs = (timestamp_ms / 1000) as i64;
    let millis = (timestamp_ms % 1000) as u32;
    let datetime: DateTime<Utc> = DateTime::from_timestamp(secs, millis * 1_000_000)
        .unwrap_or_else(|| DateTime::from_timestamp(0, 0).unwrap_or(DateTime::<Utc>::MIN_UTC));
    datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Canonical pre-image for hashing: `previousHash | sequenceNumber |
/// ISO-8601-timestamp | actor | action | target | canonical-JSON-details`
/// (spec §3). `details` is canonicalized via [`Value::canonical_bytes`] so
/// key order never perturbs the hash.
fn preimage(
    previous_hash: &str,
    sequence_number: SequenceNumber,
    timestamp_ms: u64,
    actor: &str,
    action: &str,
    target: &str,
    details: &Value,
) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(previous_hash.as_bytes());
    buf.push(b'|');
    buf.extend_from_slice(sequence_number.to_string().as_bytes());
    buf.push(b'|');
    buf.extend_from_slice(iso8601(timestamp_ms).as_bytes());
    buf.push(b'|');
    buf.extend_from_slice(actor.as_bytes());
    buf.push(b'|');
    buf.extend_from_slice(action.as_bytes());
    buf.push(b'|');
    buf.extend_from_slice(target.as_bytes());
    buf.push(b'|');
    buf.extend_from_slice(&details.canonical_bytes());
    buf
}

fn hex_sha256(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

impl AuditEntry {
    /// Build the next entry in the chain given the previous entry's hash
    /// (or [`GENESIS_HASH`] for the first entry).
    #[allow(clippy::too_many_arguments)]
    pub fn next(
        previous_hash: &str,
        sequence_number: SequenceNumber,
        timestamp_ms: u64,
        actor: impl Into<String>,
        action: impl Into<String>,
        target: impl Into<String>,
        details: Value,
    ) -> Self {
        let actor = actor.into();
        let action = action.into();
        let target = target.into();
        let pre = preimage(
            previous_hash,
            sequence_number,
            timestamp_ms,
            &actor,
            &action,
            &target,
            &details,
        );
        let hash = hex_sha256(&pre);
        Self {
            id: uuid::Uuid::new_v4(),
            sequence_number,
            timestamp_ms,
            actor,
            action,
            target,
            details,
            previous_hash: previous_hash.to_string(),
            hash,
        }
    }

    /// Recompute this entry's hash from its own fields and compare against
    /// the stored value — the per-row check `verifyChain` runs (spec §4.1).
    pub fn is_self_consistent(&self) -> bool {
        let pre = preimage(
            &self.previous_hash,
            self.sequence_number,
            self.timestamp_ms,
            &self.actor,
            &self.action,
            &self.target,
            &self.details,
        );
        hex_sha256(&pre) == self.hash
    }
}

#[cfg(test)]
#[path = "audit_tests.rs"]
mod tests;
