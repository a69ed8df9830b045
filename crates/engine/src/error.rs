// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;
use warden_storage::StorageError;

/// Errors raised by the five governed subsystems (spec §4.1–§4.8). Matches
/// the taxonomy in spec §7: validation and breaker-open outcomes are
/// modeled as values, not errors — this enum only covers genuinely
/// exceptional conditions.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("unknown actor: {0}")]
    UnknownActor(String),

    #[error("unknown bus message: {0}")]
    UnknownMessage(String),

    #[error("tool already registered: {0}")]
    DuplicateTool(&'static str),

    #[error("unknown tool: {0}")]
    UnknownTool(String),
}
