//! Azure OpenAI provider.
//!
//! Differences from OpenAI:
//! - URL structure: `{api_base}/openai/deployments/{deployment}/chat/completions`
//! - Authentication via the `api-key` header
//! - API version required as query parameter
//!
//! The deployment selects the model, so the `model` field is not sent.

use crate::http::{build_client, read_json, send_error};
use async_trait::async_trait;
use gateway_core::{
    ChatMessage, EmbeddingInput, EmbeddingRequest, EmbeddingResponse, GatewayError,
    GatewayRequest, GatewayResponse, LLMProvider, ProviderKind, StopSequences,
};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Azure OpenAI API version
pub const DEFAULT_API_VERSION: &str = "2024-02-15-preview";

/// Azure OpenAI provider configuration
#[derive(Debug)]
pub struct AzureConfig {
    /// Provider name used in logs and errors
    pub name: String,
    /// Resource endpoint, e.g. `https://my-res.openai.azure.com`
    pub api_base: String,
    /// Value of the `api-key` header
    pub api_key: SecretString,
    /// Deployment name
    pub deployment: String,
    /// `api-version` query parameter
    pub api_version: String,
    /// Per-call timeout
    pub timeout: Duration,
}

impl AzureConfig {
    /// Create a configuration with the default API version
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        api_base: impl Into<String>,
        deployment: impl Into<String>,
        api_key: SecretString,
    ) -> Self {
        Self {
            name: name.into(),
            api_base: api_base.into(),
            api_key,
            deployment: deployment.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Set the API version
    #[must_use]
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Set the timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Azure OpenAI backend bound to one deployment
pub struct AzureOpenAIProvider {
    config: AzureConfig,
    client: Client,
}

impl std::fmt::Debug for AzureOpenAIProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureOpenAIProvider")
            .field("name", &self.config.name)
            .field("deployment", &self.config.deployment)
            .finish()
    }
}

impl AzureOpenAIProvider {
    /// Create a provider
    ///
    /// # Errors
    /// Returns error if the endpoint is empty or the HTTP client cannot be created
    pub fn new(config: AzureConfig) -> Result<Self, GatewayError> {
        if config.api_base.trim().is_empty() {
            return Err(GatewayError::configuration(
                "api_base is required for Azure OpenAI",
            ));
        }

        let client = build_client(config.timeout)?;
        Ok(Self { config, client })
    }

    fn deployment_url(&self, operation: &str) -> String {
        format!(
            "{}/openai/deployments/{}/{}?api-version={}",
            self.config.api_base.trim_end_matches('/'),
            self.config.deployment,
            operation,
            self.config.api_version
        )
    }

    /// Azure request body, borrowing from the canonical request
    fn transform_request(request: &GatewayRequest) -> AzureChatRequest<'_> {
        AzureChatRequest {
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            top_p: request.top_p,
            frequency_penalty: request.frequency_penalty,
            presence_penalty: request.presence_penalty,
            stop: request.stop.as_ref(),
            n: request.n,
            user: request.user.as_deref(),
        }
    }
}

#[async_trait]
impl LLMProvider for AzureOpenAIProvider {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Azure
    }

    async fn chat_completion(
        &self,
        request: &GatewayRequest,
    ) -> Result<GatewayResponse, GatewayError> {
        let url = self.deployment_url("chat/completions");
        debug!(
            deployment = %self.config.deployment,
            url = %url,
            "Sending request to Azure OpenAI"
        );

        let response = self
            .client
            .post(&url)
            .header("api-key", self.config.api_key.expose_secret())
            .json(&Self::transform_request(request))
            .send()
            .await
            .map_err(|e| send_error(&self.config.name, &e))?;

        let mut response: GatewayResponse = read_json(&self.config.name, response).await?;
        if response.model.is_empty() {
            response.model.clone_from(&request.model);
        }
        Ok(response)
    }

    async fn embeddings(
        &self,
        request: &EmbeddingRequest,
    ) -> Result<EmbeddingResponse, GatewayError> {
        let url = self.deployment_url("embeddings");
        debug!(deployment = %self.config.deployment, "Sending embeddings request to Azure OpenAI");

        let body = AzureEmbeddingRequest {
            input: &request.input,
            user: request.user.as_deref(),
        };

        let response = self
            .client
            .post(&url)
            .header("api-key", self.config.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| send_error(&self.config.name, &e))?;

        let mut response: EmbeddingResponse = read_json(&self.config.name, response).await?;
        if response.model.is_empty() {
            response.model.clone_from(&request.model);
        }
        Ok(response)
    }
}

#[derive(Debug, Serialize)]
struct AzureChatRequest<'a> {
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    frequency_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    presence_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop: Option<&'a StopSequences>,
    #[serde(skip_serializing_if = "Option::is_none")]
    n: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct AzureEmbeddingRequest<'a> {
    input: &'a EmbeddingInput,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<&'a str>,
}
