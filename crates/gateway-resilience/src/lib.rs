//! # Gateway Resilience
//!
//! Request admission control for the LLM Model Gateway: a single global
//! token bucket consulted before any routing work.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod admission;

pub use admission::{AdmissionConfig, AdmissionGate};
