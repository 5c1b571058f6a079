//! Default LLM configs loaded strictly from environment variables.
//!
//! This module provides convenience constructors for [`LlmModelConfig`],
//! grouped by role:
//!
//! - **Answer**    → the OpenAI-compatible chat model that writes answers
//! - **Embedding** → the embedding generator (Ollama by default)
//!
//! # Environment variables
//!
//! Answer (OpenRouter / OpenAI-compatible):
//! - `OPENROUTER_API_KEY` = bearer credential (mandatory)
//! - `OPENROUTER_URL`     = API base URL (default `https://openrouter.ai/api`)
//! - `ANSWER_MODEL`       = model id (default `openai/gpt-4o-mini`)
//!
//! Embedding:
//! - `EMBEDDING_KIND`  = `ollama` (default) or `openai`
//! - `EMBEDDING_MODEL` = embedding model id (mandatory)
//! - `OLLAMA_URL` or `OLLAMA_PORT` = Ollama endpoint (mandatory for ollama)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{AiLlmError, ConfigError, env_opt, must_env, validate_http_endpoint},
};

/// Fixed sampling temperature of the answer profile.
pub const ANSWER_TEMPERATURE: f32 = 0.7;

/// Fixed token budget of one answer.
pub const ANSWER_MAX_TOKENS: u32 = 500;

/// Default answer model id.
pub const DEFAULT_ANSWER_MODEL: &str = "openai/gpt-4o-mini";

const DEFAULT_OPENROUTER_URL: &str = "https://openrouter.ai/api";

/// Resolves the Ollama endpoint strictly from environment.
///
/// Precedence:
/// 1. `OLLAMA_URL` if present and non-empty
/// 2. `OLLAMA_PORT` → `http://localhost:{port}`
///
/// # Errors
///
/// - [`ConfigError::MissingVar`] if both are missing
/// - [`ConfigError::InvalidNumber`] if `OLLAMA_PORT` is invalid
fn ollama_endpoint() -> Result<String, AiLlmError> {
    if let Some(url) = env_opt("OLLAMA_URL") {
        return Ok(url);
    }
    if let Some(port) = env_opt("OLLAMA_PORT") {
        let _ = port
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidNumber {
                var: "OLLAMA_PORT",
                reason: "expected u16 (1..=65535)",
            })?;
        return Ok(format!("http://localhost:{port}"));
    }
    Err(AiLlmError::Config(ConfigError::MissingVar(
        "OLLAMA_URL or OLLAMA_PORT",
    )))
}

/// Constructs the config for the **answer** model.
///
/// The request descriptor this config feeds is deliberately deterministic:
/// the model id is pinned by env (with a fixed default), the temperature and
/// token budget are compile-time constants.
///
/// # Errors
/// - [`ConfigError::MissingVar`] if `OPENROUTER_API_KEY` is absent
/// - [`ConfigError::InvalidFormat`] if the base URL has no http(s) scheme
pub fn config_answer() -> Result<LlmModelConfig, AiLlmError> {
    let api_key = must_env("OPENROUTER_API_KEY")?;
    let endpoint = env_opt("OPENROUTER_URL").unwrap_or_else(|| DEFAULT_OPENROUTER_URL.to_string());
    validate_http_endpoint("OPENROUTER_URL", &endpoint)?;
    let model = env_opt("ANSWER_MODEL").unwrap_or_else(|| DEFAULT_ANSWER_MODEL.to_string());

    Ok(LlmModelConfig {
        provider: LlmProvider::OpenAi,
        model,
        endpoint,
        api_key: Some(api_key),
        max_tokens: Some(ANSWER_MAX_TOKENS),
        temperature: Some(ANSWER_TEMPERATURE),
        top_p: None,
        timeout_secs: Some(120),
    })
}

/// Constructs the config for the **embedding** model.
///
/// `EMBEDDING_KIND` selects the backend: `ollama` (default) uses the local
/// Ollama runtime, `openai` reuses the OpenAI-compatible API with the same
/// bearer credential as the answer profile.
///
/// # Errors
/// - [`ConfigError::MissingVar`] if `EMBEDDING_MODEL` or the backend
///   endpoint/credential is absent
/// - [`ConfigError::UnsupportedProvider`] for an unknown `EMBEDDING_KIND`
pub fn config_embedding() -> Result<LlmModelConfig, AiLlmError> {
    let model = must_env("EMBEDDING_MODEL")?;
    let kind = env_opt("EMBEDDING_KIND").unwrap_or_else(|| "ollama".to_string());

    match kind.to_ascii_lowercase().as_str() {
        "ollama" => Ok(LlmModelConfig {
            provider: LlmProvider::Ollama,
            model,
            endpoint: ollama_endpoint()?,
            api_key: None,
            max_tokens: None,
            temperature: None,
            top_p: None,
            timeout_secs: Some(60),
        }),
        "openai" => {
            let api_key = must_env("OPENROUTER_API_KEY")?;
            let endpoint =
                env_opt("OPENROUTER_URL").unwrap_or_else(|| DEFAULT_OPENROUTER_URL.to_string());
            validate_http_endpoint("OPENROUTER_URL", &endpoint)?;
            Ok(LlmModelConfig {
                provider: LlmProvider::OpenAi,
                model,
                endpoint,
                api_key: Some(api_key),
                max_tokens: None,
                temperature: None,
                top_p: None,
                timeout_secs: Some(60),
            })
        }
        other => Err(ConfigError::UnsupportedProvider(other.to_string()).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ollama_port_must_be_numeric() {
        unsafe {
            std::env::remove_var("OLLAMA_URL");
            std::env::set_var("OLLAMA_PORT", "not-a-port");
        }
        assert!(matches!(
            ollama_endpoint(),
            Err(AiLlmError::Config(ConfigError::InvalidNumber { .. }))
        ));
        unsafe { std::env::set_var("OLLAMA_PORT", "11434") };
        assert_eq!(ollama_endpoint().unwrap(), "http://localhost:11434");
    }
}
