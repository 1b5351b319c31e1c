//! # Gateway Config
//!
//! Configuration for the LLM Model Gateway.
//!
//! The configuration file is YAML, JSON or TOML, chosen by extension. After
//! parsing, a small set of `GATEWAY_*` environment variables override file
//! values and the result is validated before anything is built from it.
//!
//! ```yaml
//! server:
//!   port: 4000
//! model_list:
//!   - model_name: gpt-4o
//!     provider: openai
//!     api_key_env: OPENAI_API_KEY
//! rate_limit:
//!   requests_per_minute: 60
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod model;
pub mod settings;

pub use error::ConfigError;
pub use loader::{load_config, ConfigFormat};
pub use model::ModelConfig;
pub use settings::{GatewayConfig, LogFormat, LoggingSettings, RateLimitConfig, ServerSettings};
