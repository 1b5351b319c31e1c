//! Provider capability contract.
//!
//! A provider wraps one backend endpoint (OpenAI, Azure OpenAI, Bedrock, ...)
//! and turns a canonical chat request into a canonical response. Routing code
//! only ever sees `Arc<dyn LLMProvider>`, never a concrete adapter.

use crate::embedding::{EmbeddingRequest, EmbeddingResponse};
use crate::error::{GatewayError, GatewayResult};
use crate::request::GatewayRequest;
use crate::response::GatewayResponse;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Backend variant a provider talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenAI or any OpenAI-compatible HTTP API
    #[serde(rename = "openai")]
    OpenAI,
    /// Azure OpenAI Service
    Azure,
    /// AWS Bedrock invoke-model API
    Bedrock,
}

impl ProviderKind {
    /// All supported kinds
    pub const ALL: [Self; 3] = [Self::OpenAI, Self::Azure, Self::Bedrock];

    /// Configuration identifier of this kind
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAI => "openai",
            Self::Azure => "azure",
            Self::Bedrock => "bedrock",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| GatewayError::configuration(format!("unknown provider kind '{s}'")))
    }
}

/// Capability every backend exposes to the router.
///
/// Implementations must be safe to call from many tasks at once; any client or
/// connection state stays private to the implementation. Dropping the returned
/// future abandons the backend call.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Diagnostic name, not used for routing
    fn name(&self) -> &str;

    /// Backend variant
    fn kind(&self) -> ProviderKind;

    /// Execute a chat completion
    async fn chat_completion(&self, request: &GatewayRequest) -> GatewayResult<GatewayResponse>;

    /// Create embeddings; unsupported unless the variant overrides it
    async fn embeddings(&self, _request: &EmbeddingRequest) -> GatewayResult<EmbeddingResponse> {
        Err(GatewayError::not_implemented("embeddings", self.kind()))
    }
}
