//! Default LLM configs loaded from environment variables.
//!
//! Convenience constructors for [`LlmModelConfig`], one per profile:
//!
//! - **completion** → grounded question answering
//! - **embedding**  → vector retrieval for indexing and querying
//!
//! # Environment variables
//!
//! Completion profile:
//! - `LLM_KIND`            = `openai` (default) or `ollama`
//! - `COMPLETION_MODEL`    = model id (default `llama3-8b-8192`)
//! - `COMPLETION_ENDPOINT` = endpoint base; defaults to
//!   `https://api.groq.com/openai/v1` for openai, `http://localhost:11434`
//!   for ollama
//! - `LLM_API_KEY`         = bearer credential (required for openai kind)
//! - `LLM_MAX_TOKENS`      = optional max tokens (default 512)
//! - `LLM_TIMEOUT_SECS`    = optional request timeout (default 60)
//!
//! Embedding profile:
//! - `EMBEDDING_KIND`      = `ollama` (default) or `openai`
//! - `EMBEDDING_MODEL`     = model id (default `nomic-embed-text`)
//! - `EMBEDDING_ENDPOINT`  = endpoint base; same defaults as above
//! - `EMBEDDING_TIMEOUT_SECS` = optional request timeout (default 30)
//! - `EMBEDDING_DIM`       = optional declared dimension, checked by the
//!   ingestion layer

use crate::config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
use crate::error_handler::{
    AiLlmError, ConfigError, env_opt, env_opt_u32, env_opt_u64, env_opt_usize, must_env,
    validate_http_endpoint,
};

const GROQ_ENDPOINT: &str = "https://api.groq.com/openai/v1";
const OLLAMA_ENDPOINT: &str = "http://localhost:11434";

/// Parses a provider kind string (`openai` / `ollama`).
fn parse_kind(value: &str) -> Result<LlmProvider, AiLlmError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "ollama" => Ok(LlmProvider::Ollama),
        "openai" | "groq" | "chatgpt" => Ok(LlmProvider::OpenAI),
        other => Err(ConfigError::UnsupportedProvider(other.to_string()).into()),
    }
}

fn default_endpoint(provider: LlmProvider) -> &'static str {
    match provider {
        LlmProvider::Ollama => OLLAMA_ENDPOINT,
        LlmProvider::OpenAI => GROQ_ENDPOINT,
    }
}

/// Constructs the **completion** profile from environment.
///
/// # Errors
/// - [`ConfigError::UnsupportedProvider`] for an unknown `LLM_KIND`
/// - [`ConfigError::MissingVar`] if `LLM_API_KEY` is absent for openai kind
/// - [`ConfigError::InvalidFormat`] for an endpoint without http/https
pub fn config_completion() -> Result<LlmModelConfig, AiLlmError> {
    let provider = parse_kind(&env_opt("LLM_KIND").unwrap_or_else(|| "openai".into()))?;
    let endpoint =
        env_opt("COMPLETION_ENDPOINT").unwrap_or_else(|| default_endpoint(provider).to_string());
    validate_http_endpoint("COMPLETION_ENDPOINT", &endpoint)?;

    let api_key = match provider {
        LlmProvider::OpenAI => Some(must_env("LLM_API_KEY")?),
        LlmProvider::Ollama => None,
    };

    Ok(LlmModelConfig {
        provider,
        model: env_opt("COMPLETION_MODEL").unwrap_or_else(|| "llama3-8b-8192".into()),
        endpoint,
        api_key,
        max_tokens: Some(env_opt_u32("LLM_MAX_TOKENS")?.unwrap_or(512)),
        temperature: Some(0.0),
        top_p: None,
        timeout_secs: Some(env_opt_u64("LLM_TIMEOUT_SECS")?.unwrap_or(60)),
    })
}

/// Constructs the **embedding** profile from environment.
///
/// # Errors
/// - [`ConfigError::UnsupportedProvider`] for an unknown `EMBEDDING_KIND`
/// - [`ConfigError::MissingVar`] if `LLM_API_KEY` is absent for openai kind
/// - [`ConfigError::InvalidFormat`] for an endpoint without http/https
pub fn config_embedding() -> Result<LlmModelConfig, AiLlmError> {
    let provider = parse_kind(&env_opt("EMBEDDING_KIND").unwrap_or_else(|| "ollama".into()))?;
    let endpoint =
        env_opt("EMBEDDING_ENDPOINT").unwrap_or_else(|| default_endpoint(provider).to_string());
    validate_http_endpoint("EMBEDDING_ENDPOINT", &endpoint)?;

    let api_key = match provider {
        LlmProvider::OpenAI => Some(must_env("LLM_API_KEY")?),
        LlmProvider::Ollama => None,
    };

    Ok(LlmModelConfig {
        provider,
        model: env_opt("EMBEDDING_MODEL").unwrap_or_else(|| "nomic-embed-text".into()),
        endpoint,
        api_key,
        max_tokens: None,
        temperature: Some(0.0),
        top_p: None,
        timeout_secs: Some(env_opt_u64("EMBEDDING_TIMEOUT_SECS")?.unwrap_or(30)),
    })
}

/// Reads the optional declared embedding dimension (`EMBEDDING_DIM`).
///
/// # Errors
/// [`ConfigError::InvalidNumber`] if the variable is set but not a valid
/// `usize`.
pub fn embedding_dimension() -> Result<Option<usize>, AiLlmError> {
    env_opt_usize("EMBEDDING_DIM")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parsing_accepts_aliases() {
        assert_eq!(parse_kind("ollama").unwrap(), LlmProvider::Ollama);
        assert_eq!(parse_kind("OpenAI").unwrap(), LlmProvider::OpenAI);
        assert_eq!(parse_kind("groq").unwrap(), LlmProvider::OpenAI);
        assert!(parse_kind("bedrock").is_err());
    }

    #[test]
    fn endpoint_defaults_follow_provider() {
        assert_eq!(default_endpoint(LlmProvider::Ollama), OLLAMA_ENDPOINT);
        assert_eq!(default_endpoint(LlmProvider::OpenAI), GROQ_ENDPOINT);
    }
}
