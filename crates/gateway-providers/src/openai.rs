//! OpenAI provider.
//!
//! The canonical request and response types already follow the OpenAI schema,
//! so this adapter forwards the request body as-is and decodes the response
//! directly.

use crate::http::{build_client, read_json, send_error};
use async_trait::async_trait;
use gateway_core::{
    EmbeddingRequest, EmbeddingResponse, GatewayError, GatewayRequest, GatewayResponse,
    LLMProvider, ProviderKind,
};
use reqwest::{Client, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::debug;

/// Default API base
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// OpenAI provider configuration
#[derive(Debug)]
pub struct OpenAIConfig {
    /// Provider name used in logs and errors
    pub name: String,
    /// API base, including the version segment
    pub api_base: String,
    /// Bearer token; empty sends no Authorization header
    pub api_key: SecretString,
    /// Per-call timeout
    pub timeout: Duration,
}

impl OpenAIConfig {
    /// Create a configuration for the public API
    #[must_use]
    pub fn new(name: impl Into<String>, api_key: SecretString) -> Self {
        Self {
            name: name.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            api_key,
            timeout: Duration::from_secs(60),
        }
    }

    /// Set the API base
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set the timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// OpenAI-compatible backend
pub struct OpenAIProvider {
    config: OpenAIConfig,
    client: Client,
}

impl std::fmt::Debug for OpenAIProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIProvider")
            .field("name", &self.config.name)
            .field("api_base", &self.config.api_base)
            .finish()
    }
}

impl OpenAIProvider {
    /// Create a provider
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created
    pub fn new(config: OpenAIConfig) -> Result<Self, GatewayError> {
        let client = build_client(config.timeout)?;
        Ok(Self { config, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.api_base.trim_end_matches('/'), path)
    }

    fn post(&self, url: &str) -> RequestBuilder {
        let builder = self.client.post(url);
        let key = self.config.api_key.expose_secret();
        if key.is_empty() {
            builder
        } else {
            builder.bearer_auth(key)
        }
    }
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAI
    }

    async fn chat_completion(
        &self,
        request: &GatewayRequest,
    ) -> Result<GatewayResponse, GatewayError> {
        let url = self.url("chat/completions");
        debug!(provider = %self.config.name, url = %url, "Sending request to OpenAI");

        let response = self
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| send_error(&self.config.name, &e))?;

        read_json(&self.config.name, response).await
    }

    async fn embeddings(
        &self,
        request: &EmbeddingRequest,
    ) -> Result<EmbeddingResponse, GatewayError> {
        let url = self.url("embeddings");
        debug!(provider = %self.config.name, url = %url, "Sending embeddings request to OpenAI");

        let response = self
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| send_error(&self.config.name, &e))?;

        read_json(&self.config.name, response).await
    }
}
