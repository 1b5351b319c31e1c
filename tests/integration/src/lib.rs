//! Integration tests for the LLM model gateway
//!
//! Each test starts the real HTTP server on an ephemeral port, with provider
//! adapters built from a configuration document and pointed at wiremock
//! upstreams:
//! - Pooled OpenAI and Azure backends behind one model name
//! - Bedrock with SigV4 signing
//! - Admission control, error mapping and metrics over HTTP
//! - Loading configuration files from disk

pub mod fixtures;
pub mod helpers;
pub mod mock_providers;

// Re-export commonly used items
pub use fixtures::*;
pub use helpers::*;
pub use mock_providers::*;

#[cfg(test)]
mod config_tests;
#[cfg(test)]
mod e2e_tests;
#[cfg(test)]
mod rate_limit_tests;
