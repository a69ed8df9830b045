// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The narrow interface to the large-language-model backend handlers use to
//! produce text (out of scope per spec §1).

use async_trait::async_trait;

use crate::error::AdapterError;

#[derive(Debug, Clone, Copy)]
pub struct DecodingParams {
    pub temperature: f32,
    pub max_tokens: u32,
}

#[async_trait]
pub trait LlmBackend: Send + Sync {
    async fn complete(&self, prompt: &str, params: DecodingParams) -> Result<String, AdapterError>;
}
