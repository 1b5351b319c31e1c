//! # Gateway Providers
//!
//! Backend adapters for the LLM Model Gateway:
//! - OpenAI (and any OpenAI-compatible endpoint)
//! - Azure OpenAI
//! - AWS Bedrock
//!
//! [`ProviderFactory`] turns `model_list` entries into adapters and
//! registers them with a [`gateway_routing::ModelRouter`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod http;

pub mod azure;
pub mod bedrock;
pub mod factory;
pub mod openai;
pub mod sigv4;

pub use azure::{AzureConfig, AzureOpenAIProvider};
pub use bedrock::{BedrockConfig, BedrockProvider};
pub use factory::{build_router, ProviderFactory};
pub use openai::{OpenAIConfig, OpenAIProvider};
pub use sigv4::AwsCredentials;
