//! Mock LLM upstreams for integration testing
//!
//! Wiremock servers that answer the way OpenAI, Azure OpenAI and Bedrock do.

use crate::fixtures::{openai_chat_response, openai_embeddings_response, openai_error_response};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mock OpenAI API server; the adapter's `api_base` is [`MockOpenAI::api_base`]
pub struct MockOpenAI {
    pub server: MockServer,
}

impl MockOpenAI {
    /// Start a new mock server
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL to configure as `api_base`
    pub fn api_base(&self) -> String {
        format!("{}/v1", self.server.uri())
    }

    /// Requests received so far
    pub async fn calls(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map_or(0, |requests| requests.len())
    }

    /// Answer every chat completion with `content`
    pub async fn mock_chat_completion(&self, model: &str, content: &str) {
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-openai-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(openai_chat_response(model, content)))
            .mount(&self.server)
            .await;
    }

    /// Answer after `delay`
    pub async fn mock_chat_completion_delayed(&self, model: &str, content: &str, delay: Duration) {
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(openai_chat_response(model, content))
                    .set_delay(delay),
            )
            .mount(&self.server)
            .await;
    }

    /// Fail every chat completion with `status`
    pub async fn mock_error(&self, status: u16, message: &str) {
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(
                ResponseTemplate::new(status)
                    .set_body_json(openai_error_response("server_error", message)),
            )
            .mount(&self.server)
            .await;
    }

    /// Answer embeddings with a fixed vector
    pub async fn mock_embeddings(&self, model: &str, vector: &[f32]) {
        Mock::given(method("POST"))
            .and(path("/v1/embeddings"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(openai_embeddings_response(model, vector)),
            )
            .mount(&self.server)
            .await;
    }
}

/// Mock Azure OpenAI resource
pub struct MockAzure {
    pub server: MockServer,
}

impl MockAzure {
    /// Start a new mock server
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Resource endpoint to configure as `api_base`
    pub fn api_base(&self) -> String {
        self.server.uri()
    }

    /// Answer chat completions for `deployment` with `content`
    pub async fn mock_chat_completion(&self, deployment: &str, content: &str) {
        Mock::given(method("POST"))
            .and(path(format!("/openai/deployments/{deployment}/chat/completions")))
            .and(query_param("api-version", "2024-02-15-preview"))
            .and(header("api-key", "azure-test-key"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(openai_chat_response(deployment, content)),
            )
            .mount(&self.server)
            .await;
    }
}

/// Mock Bedrock runtime endpoint
pub struct MockBedrock {
    pub server: MockServer,
}

impl MockBedrock {
    /// Start a new mock server
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Endpoint override to configure as `api_base`
    pub fn endpoint(&self) -> String {
        self.server.uri()
    }

    /// Answer signed invocations of `model_id` with an Anthropic text completion
    pub async fn mock_invoke(&self, model_id: &str, completion: &str) {
        Mock::given(method("POST"))
            .and(path(format!("/model/{model_id}/invoke")))
            .and(header_exists("authorization"))
            .and(header_exists("x-amz-date"))
            .and(header_exists("x-amz-content-sha256"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "completion": completion,
                "stop_reason": "stop_sequence"
            })))
            .mount(&self.server)
            .await;
    }
}
