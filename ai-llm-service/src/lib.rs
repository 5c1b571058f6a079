//! Shared LLM service with two active profiles: `answer` and `embedding`.
//!
//! The `answer` profile talks to an OpenAI-compatible chat-completions API
//! (OpenRouter in production) and the `embedding` profile to either a local
//! Ollama runtime or the same OpenAI-compatible API. Construct
//! [`service_profiles::LlmServiceProfiles`] once, wrap it in `Arc`, and pass
//! clones to dependents.

pub mod config;
pub mod error_handler;
pub mod service_profiles;
pub mod services;

pub use config::llm_model_config::LlmModelConfig;
pub use config::llm_provider::LlmProvider;
pub use error_handler::{AiLlmError, ConfigError, ProviderError};
pub use service_profiles::LlmServiceProfiles;
