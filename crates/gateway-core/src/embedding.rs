//! Embedding request and response types (OpenAI format).

use crate::error::GatewayError;
use serde::{Deserialize, Serialize};

/// Embedding request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingRequest {
    /// Target model name, the routing key
    pub model: String,
    /// Text(s) to embed
    pub input: EmbeddingInput,
    /// User identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl EmbeddingRequest {
    /// Create a request for a single input
    #[must_use]
    pub fn new(model: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            input: EmbeddingInput::One(input.into()),
            user: None,
        }
    }

    /// Validate the request
    ///
    /// # Errors
    /// Returns a validation error if the model or input is empty
    pub fn validate(&self) -> Result<(), GatewayError> {
        if self.model.trim().is_empty() {
            return Err(GatewayError::validation("model is required", Some("model")));
        }
        if self.input.is_empty() {
            return Err(GatewayError::validation("input cannot be empty", Some("input")));
        }
        Ok(())
    }
}

/// Embedding input: a bare string or a list of strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmbeddingInput {
    /// Single input
    One(String),
    /// Several inputs
    Many(Vec<String>),
}

impl EmbeddingInput {
    /// Inputs as a slice-like list
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        match self {
            Self::One(s) => vec![s.as_str()],
            Self::Many(v) => v.iter().map(String::as_str).collect(),
        }
    }

    /// Whether there is nothing to embed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::One(_) => false,
            Self::Many(v) => v.is_empty(),
        }
    }
}

/// Embedding response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingResponse {
    /// Always "list"
    #[serde(default = "default_list")]
    pub object: String,
    /// One vector per input, in input order
    pub data: Vec<Embedding>,
    /// Model name
    #[serde(default)]
    pub model: String,
    /// Token accounting
    #[serde(default)]
    pub usage: EmbeddingUsage,
}

fn default_list() -> String {
    "list".to_string()
}

impl EmbeddingResponse {
    /// Build a response from vectors
    #[must_use]
    pub fn new(model: impl Into<String>, data: Vec<Embedding>) -> Self {
        Self {
            object: default_list(),
            data,
            model: model.into(),
            usage: EmbeddingUsage::default(),
        }
    }
}

/// A single embedding vector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Embedding {
    /// Always "embedding"
    #[serde(default = "default_embedding")]
    pub object: String,
    /// Input position
    pub index: u32,
    /// Vector
    pub embedding: Vec<f32>,
}

fn default_embedding() -> String {
    "embedding".to_string()
}

impl Embedding {
    /// Create an embedding entry
    #[must_use]
    pub fn new(index: u32, embedding: Vec<f32>) -> Self {
        Self {
            object: default_embedding(),
            index,
            embedding,
        }
    }
}

/// Embedding token accounting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddingUsage {
    /// Prompt tokens
    #[serde(default)]
    pub prompt_tokens: u32,
    /// Total tokens
    #[serde(default)]
    pub total_tokens: u32,
}
