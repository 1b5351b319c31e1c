//! # Gateway Routing
//!
//! Model-name routing for the LLM model gateway.
//!
//! This crate provides:
//! - [`ProviderPool`]: interchangeable providers registered under one model
//!   name, selected round-robin with a lock-free counter
//! - [`ModelRouter`]: exact, case-sensitive model name to pool mapping, built
//!   once at startup and read-only afterwards

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod pool;
pub mod router;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export main types
pub use pool::ProviderPool;
pub use router::ModelRouter;
