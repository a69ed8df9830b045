// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared error taxonomy for the core data model. Subsystem crates
//! (`warden-engine`, `warden-storage`, `warden-daemon`) define their own
//! richer error enums and convert into/from these where they cross a
//! module boundary.

use thiserror::Error;

/// Errors raised while constructing or validating core data types.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("unknown task type: {0}")]
    UnknownTaskType(String),

    #[error("unknown agent role: {0}")]
    UnknownRole(String),
}
