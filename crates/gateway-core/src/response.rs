//! Response types for the gateway.
//!
//! These mirror the OpenAI chat-completion response. Fields that some
//! OpenAI-compatible backends omit carry serde defaults so their bodies still
//! deserialize.

use crate::request::MessageRole;
use serde::{Deserialize, Serialize};

/// Canonical chat-completion response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayResponse {
    /// Response identifier
    #[serde(default)]
    pub id: String,

    /// Object type, always "chat.completion"
    #[serde(default = "default_object")]
    pub object: String,

    /// Unix timestamp (seconds)
    #[serde(default)]
    pub created: i64,

    /// Model that produced the response
    #[serde(default)]
    pub model: String,

    /// Generated choices
    #[serde(default)]
    pub choices: Vec<Choice>,

    /// Token accounting; zero when the backend does not report it
    #[serde(default)]
    pub usage: Usage,

    /// Backend configuration fingerprint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_fingerprint: Option<String>,
}

fn default_object() -> String {
    "chat.completion".to_string()
}

impl GatewayResponse {
    /// Create a new builder
    #[must_use]
    pub fn builder() -> GatewayResponseBuilder {
        GatewayResponseBuilder::default()
    }

    /// Text of the first choice, if any
    #[must_use]
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
    }
}

/// Builder for `GatewayResponse`
#[derive(Debug, Default)]
pub struct GatewayResponseBuilder {
    id: Option<String>,
    model: String,
    created: Option<i64>,
    choices: Vec<Choice>,
    usage: Usage,
}

impl GatewayResponseBuilder {
    /// Set the response id
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the model
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the creation timestamp
    #[must_use]
    pub fn created(mut self, created: i64) -> Self {
        self.created = Some(created);
        self
    }

    /// Add a choice
    #[must_use]
    pub fn choice(mut self, choice: Choice) -> Self {
        self.choices.push(choice);
        self
    }

    /// Set usage
    #[must_use]
    pub fn usage(mut self, usage: Usage) -> Self {
        self.usage = usage;
        self
    }

    /// Build the response, generating id and timestamp when unset
    #[must_use]
    pub fn build(self) -> GatewayResponse {
        GatewayResponse {
            id: self
                .id
                .unwrap_or_else(|| format!("chatcmpl-{}", uuid::Uuid::new_v4().simple())),
            object: default_object(),
            created: self.created.unwrap_or_else(|| chrono::Utc::now().timestamp()),
            model: self.model,
            choices: self.choices,
            usage: self.usage,
            system_fingerprint: None,
        }
    }
}

/// A single generated choice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    /// Position in the choice list
    #[serde(default)]
    pub index: u32,
    /// Generated message
    pub message: ResponseMessage,
    /// Why generation stopped
    #[serde(default)]
    pub finish_reason: Option<FinishReason>,
}

impl Choice {
    /// Assistant text choice
    #[must_use]
    pub fn assistant(index: u32, content: impl Into<String>, finish_reason: FinishReason) -> Self {
        Self {
            index,
            message: ResponseMessage {
                role: MessageRole::Assistant,
                content: Some(content.into()),
            },
            finish_reason: Some(finish_reason),
        }
    }
}

/// Message inside a choice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseMessage {
    /// Author role, normally assistant
    pub role: MessageRole,
    /// Generated text
    #[serde(default)]
    pub content: Option<String>,
}

/// Finish reason; unknown upstream values are preserved verbatim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FinishReason {
    /// Natural stop or stop sequence
    Stop,
    /// Token limit reached
    Length,
    /// Model requested tool calls
    ToolCalls,
    /// Output filtered
    ContentFilter,
    /// Any other upstream value
    Other(String),
}

impl From<String> for FinishReason {
    fn from(value: String) -> Self {
        match value.as_str() {
            "stop" => Self::Stop,
            "length" => Self::Length,
            "tool_calls" => Self::ToolCalls,
            "content_filter" => Self::ContentFilter,
            _ => Self::Other(value),
        }
    }
}

impl From<FinishReason> for String {
    fn from(reason: FinishReason) -> Self {
        match reason {
            FinishReason::Stop => "stop".to_string(),
            FinishReason::Length => "length".to_string(),
            FinishReason::ToolCalls => "tool_calls".to_string(),
            FinishReason::ContentFilter => "content_filter".to_string(),
            FinishReason::Other(other) => other,
        }
    }
}

/// Token usage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Prompt tokens
    #[serde(default)]
    pub prompt_tokens: u32,
    /// Completion tokens
    #[serde(default)]
    pub completion_tokens: u32,
    /// Total tokens
    #[serde(default)]
    pub total_tokens: u32,
}

/// Entry of the `/v1/models` listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelObject {
    /// Model name
    pub id: String,
    /// Always "model"
    pub object: String,
    /// Unix timestamp
    pub created: i64,
    /// Owner label
    pub owned_by: String,
}

impl ModelObject {
    /// Create a model entry
    #[must_use]
    pub fn new(id: impl Into<String>, owned_by: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            object: "model".to_string(),
            created: 0,
            owned_by: owned_by.into(),
        }
    }
}

/// `/v1/models` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsResponse {
    /// Always "list"
    pub object: String,
    /// Models
    pub data: Vec<ModelObject>,
}

impl ModelsResponse {
    /// Wrap a list of models
    #[must_use]
    pub fn new(data: Vec<ModelObject>) -> Self {
        Self {
            object: "list".to_string(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_openai_body() {
        let body = r#"{
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "created": 1677652288,
            "model": "gpt-4o",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Hello!"},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 9, "completion_tokens": 12, "total_tokens": 21}
        }"#;

        let response: GatewayResponse = serde_json::from_str(body).expect("parse");
        assert_eq!(response.id, "chatcmpl-123");
        assert_eq!(response.first_content(), Some("Hello!"));
        assert_eq!(response.choices[0].finish_reason, Some(FinishReason::Stop));
        assert_eq!(response.usage.total_tokens, 21);
    }

    #[test]
    fn test_missing_usage_defaults_to_zero() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"x"}}]}"#;
        let response: GatewayResponse = serde_json::from_str(body).expect("parse");

        assert_eq!(response.usage, Usage::default());
        assert_eq!(response.object, "chat.completion");
    }

    #[test]
    fn test_unknown_finish_reason_round_trips() {
        let reason: FinishReason = serde_json::from_str("\"end_turn\"").expect("parse");
        assert_eq!(reason, FinishReason::Other("end_turn".to_string()));
        assert_eq!(serde_json::to_string(&reason).expect("serialize"), "\"end_turn\"");
    }

    #[test]
    fn test_builder_generates_id() {
        let response = GatewayResponse::builder()
            .model("m")
            .choice(Choice::assistant(0, "hi", FinishReason::Stop))
            .build();

        assert!(response.id.starts_with("chatcmpl-"));
        assert!(response.created > 0);
        assert_eq!(response.first_content(), Some("hi"));
    }
}
