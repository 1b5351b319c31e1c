//! # AWS Bedrock Provider
//!
//! Invokes text-generation models through the Bedrock runtime `InvokeModel`
//! API, signed with AWS Signature Version 4.
//!
//! Chat messages are flattened into a single prompt:
//!
//! ```text
//! system: You are terse.
//! User: Hello
//! Assistant:
//! ```
//!
//! and the model is expected to answer with `{"completion": ...}` or
//! `{"generated_text": ...}`. Any other body is taken verbatim as the
//! completion text.
//!
//! Embeddings use the Titan request shape, one invocation per input.

use crate::http::{build_client, read_body, send_error};
use crate::sigv4::{sign_request, uri_encode, AwsCredentials, SigningParams};
use async_trait::async_trait;
use gateway_core::{
    ChatMessage, Choice, Embedding, EmbeddingRequest, EmbeddingResponse, FinishReason,
    GatewayError, GatewayRequest, GatewayResponse, LLMProvider, MessageRole, ProviderKind,
    Usage,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use url::Url;

const SERVICE: &str = "bedrock";

/// AWS Bedrock configuration
#[derive(Debug)]
pub struct BedrockConfig {
    /// Provider name used in logs and errors
    pub name: String,
    /// Bedrock model id, e.g. `anthropic.claude-v2`
    pub model_id: String,
    /// AWS region (e.g., "us-east-1")
    pub region: String,
    /// Signing credentials
    pub credentials: AwsCredentials,
    /// Custom endpoint URL (for testing/VPC endpoints)
    pub endpoint_url: Option<String>,
    /// Per-call timeout
    pub timeout: Duration,
}

impl BedrockConfig {
    /// Create a configuration for the regional endpoint
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        model_id: impl Into<String>,
        region: impl Into<String>,
        credentials: AwsCredentials,
    ) -> Self {
        Self {
            name: name.into(),
            model_id: model_id.into(),
            region: region.into(),
            credentials,
            endpoint_url: None,
            timeout: Duration::from_secs(60),
        }
    }

    /// Set custom endpoint URL
    #[must_use]
    pub fn with_endpoint_url(mut self, url: impl Into<String>) -> Self {
        self.endpoint_url = Some(url.into());
        self
    }

    /// Set the timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the Bedrock service endpoint
    #[must_use]
    pub fn base_url(&self) -> String {
        self.endpoint_url.as_ref().map_or_else(
            || format!("https://bedrock-runtime.{}.amazonaws.com", self.region),
            |url| url.trim_end_matches('/').to_string(),
        )
    }
}

/// AWS Bedrock provider bound to one model id
pub struct BedrockProvider {
    config: BedrockConfig,
    client: Client,
    invoke_url: Url,
}

impl std::fmt::Debug for BedrockProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BedrockProvider")
            .field("name", &self.config.name)
            .field("model_id", &self.config.model_id)
            .field("region", &self.config.region)
            .finish()
    }
}

impl BedrockProvider {
    /// Create a new Bedrock provider
    ///
    /// # Errors
    /// Returns error if the model id or endpoint is unusable or the HTTP
    /// client cannot be created
    pub fn new(config: BedrockConfig) -> Result<Self, GatewayError> {
        if config.model_id.trim().is_empty() {
            return Err(GatewayError::configuration(
                "a Bedrock model id (deployment_name) is required",
            ));
        }

        let invoke_url = Url::parse(&format!(
            "{}/model/{}/invoke",
            config.base_url(),
            uri_encode(&config.model_id, true)
        ))
        .map_err(|e| GatewayError::configuration(format!("invalid Bedrock endpoint: {e}")))?;

        let client = build_client(config.timeout)?;

        Ok(Self {
            config,
            client,
            invoke_url,
        })
    }

    /// Flatten chat messages into a single completion prompt
    fn build_prompt(messages: &[ChatMessage]) -> String {
        let mut prompt = String::new();
        for message in messages {
            match message.role {
                MessageRole::User => prompt.push_str("User: "),
                MessageRole::Assistant => prompt.push_str("Assistant: "),
                other => {
                    prompt.push_str(&other.to_string());
                    prompt.push_str(": ");
                }
            }
            prompt.push_str(&message.text());
            prompt.push('\n');
        }
        prompt.push_str("Assistant: ");
        prompt
    }

    fn transform_request(request: &GatewayRequest) -> BedrockTextRequest {
        BedrockTextRequest {
            prompt: Self::build_prompt(&request.messages),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            top_p: request.top_p,
            stop: request.stop_sequences(),
        }
    }

    /// Completion text from a response body: `completion`, then
    /// `generated_text`, then the raw body
    fn extract_completion(body: &[u8]) -> String {
        if let Ok(serde_json::Value::Object(map)) = serde_json::from_slice(body) {
            for field in ["completion", "generated_text"] {
                if let Some(serde_json::Value::String(text)) = map.get(field) {
                    return text.clone();
                }
            }
        }
        String::from_utf8_lossy(body).into_owned()
    }

    /// Sign and send one `InvokeModel` call
    async fn invoke(&self, body: Vec<u8>) -> Result<Vec<u8>, GatewayError> {
        let params = SigningParams {
            credentials: &self.config.credentials,
            region: &self.config.region,
            service: SERVICE,
            time: chrono::Utc::now(),
        };
        let extra = [
            ("accept", "application/json"),
            ("content-type", "application/json"),
        ];
        let signed = sign_request(&params, "POST", &self.invoke_url, &extra, &body)?;

        let mut builder = self.client.post(self.invoke_url.clone());
        for (name, value) in extra {
            builder = builder.header(name, value);
        }
        for (name, value) in &signed {
            builder = builder.header(name.as_str(), value.as_str());
        }

        debug!(
            provider = %self.config.name,
            model_id = %self.config.model_id,
            "Sending request to Bedrock"
        );

        let response = builder
            .body(body)
            .send()
            .await
            .map_err(|e| send_error(&self.config.name, &e))?;

        read_body(&self.config.name, response).await
    }
}

#[async_trait]
impl LLMProvider for BedrockProvider {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Bedrock
    }

    async fn chat_completion(
        &self,
        request: &GatewayRequest,
    ) -> Result<GatewayResponse, GatewayError> {
        let payload = serde_json::to_vec(&Self::transform_request(request))
            .map_err(|e| GatewayError::internal(format!("failed to encode Bedrock request: {e}")))?;

        let body = self.invoke(payload).await?;
        let text = Self::extract_completion(&body);

        Ok(GatewayResponse::builder()
            .model(&request.model)
            .choice(Choice::assistant(0, text, FinishReason::Stop))
            .usage(Usage::default())
            .build())
    }

    async fn embeddings(
        &self,
        request: &EmbeddingRequest,
    ) -> Result<EmbeddingResponse, GatewayError> {
        let texts = request.input.texts();
        let mut data = Vec::with_capacity(texts.len());

        for (index, text) in texts.into_iter().enumerate() {
            let payload = serde_json::to_vec(&TitanEmbeddingRequest { input_text: text })
                .map_err(|e| {
                    GatewayError::internal(format!("failed to encode Bedrock request: {e}"))
                })?;

            let body = self.invoke(payload).await?;
            let parsed: TitanEmbeddingResponse = serde_json::from_slice(&body).map_err(|e| {
                GatewayError::provider(
                    &self.config.name,
                    format!("failed to parse embedding response: {e}"),
                    None,
                )
            })?;

            data.push(Embedding::new(index as u32, parsed.embedding));
        }

        Ok(EmbeddingResponse::new(&request.model, data))
    }
}

/// Text-generation payload
#[derive(Debug, Serialize)]
struct BedrockTextRequest {
    prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    stop: Vec<String>,
}

#[derive(Debug, Serialize)]
struct TitanEmbeddingRequest<'a> {
    #[serde(rename = "inputText")]
    input_text: &'a str,
}

#[derive(Debug, Deserialize)]
struct TitanEmbeddingResponse {
    embedding: Vec<f32>,
}
