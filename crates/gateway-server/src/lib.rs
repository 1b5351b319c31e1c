//! # Gateway Server
//!
//! HTTP server for the LLM model gateway.
//!
//! This crate provides:
//! - The [`Gateway`] orchestrator: admission, validation, routing
//! - OpenAI-compatible endpoints on an Axum router
//! - Health and Prometheus metrics endpoints
//! - Graceful shutdown on SIGINT/SIGTERM

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod extractors;
pub mod gateway;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

// Re-export main types
pub use error::ApiError;
pub use gateway::Gateway;
pub use routes::create_router;
pub use server::{shutdown_signal, Server, ServerConfig};
pub use state::{AppState, AppStateBuilder};
