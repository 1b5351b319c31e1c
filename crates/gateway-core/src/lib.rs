//! # Gateway Core
//!
//! Core types, traits, and error handling for the LLM model gateway.
//!
//! This crate provides the foundational types used throughout the gateway:
//! - Canonical (OpenAI-compatible) request and response types
//! - The provider capability trait every backend implements
//! - Error types shared by routing, providers and the HTTP layer

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod embedding;
pub mod error;
pub mod provider;
pub mod request;
pub mod response;

// Re-export commonly used types
pub use embedding::{Embedding, EmbeddingInput, EmbeddingRequest, EmbeddingResponse, EmbeddingUsage};
pub use error::{GatewayError, GatewayResult};
pub use provider::{LLMProvider, ProviderKind};
pub use request::{
    ChatMessage, ContentPart, GatewayRequest, GatewayRequestBuilder, MessageContent, MessageRole,
    StopSequences,
};
pub use response::{
    Choice, FinishReason, GatewayResponse, GatewayResponseBuilder, ModelObject, ModelsResponse,
    ResponseMessage, Usage,
};
