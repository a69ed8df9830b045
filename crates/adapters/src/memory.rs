// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The narrow capability contract the scheduler depends on for the
//! embedding/vector memory layer (out of scope per spec §1): only
//! consolidation and recall, never the embedding model itself.

use async_trait::async_trait;
use warden_core::Value;

use crate::error::AdapterError;

#[async_trait]
pub trait VectorMemory: Send + Sync {
    async fn consolidate(&self) -> Result<u64, AdapterError>;
    async fn recall(&self, query: &str, limit: usize) -> Result<Vec<Value>, AdapterError>;
}
