//! Shared LLM service with two active profiles: **completion** and
//! **embedding**.
//!
//! - Lives in the same Tokio runtime as the application.
//! - Construct once, wrap in `Arc`, and pass clones to dependents.
//! - Caches underlying HTTP clients per config (endpoint+model+key+timeout).
//! - Completion failures never raise: they fold into
//!   [`CompletionOutcome::Degraded`] so the answer pipeline always receives a
//!   displayable string. Embedding failures raise and are surfaced to the
//!   caller.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use ai_llm_service::config::default_config;
//! use ai_llm_service::service_profiles::LlmServiceProfiles;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), ai_llm_service::AiLlmError> {
//! let completion = default_config::config_completion()?;
//! let embedding = default_config::config_embedding()?;
//! let svc = Arc::new(LlmServiceProfiles::new(completion, embedding, None)?);
//!
//! let outcome = svc.complete("What is the vacation policy?", None).await;
//! println!("{}", outcome.into_text());
//!
//! let vectors = svc.embed_batch(&["Ferris".to_string()]).await?;
//! println!("dim = {}", vectors[0].len());
//! # Ok(()) }
//! ```

use std::{
    collections::HashMap,
    hash::{Hash, Hasher},
    sync::Arc,
};

use tokio::sync::RwLock;
use tracing::warn;

use crate::config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
use crate::error_handler::AiLlmError;
use crate::health_service::{HealthService, HealthStatus};
use crate::normalize::{self, CompletionOutcome};
use crate::services::{ollama_service::OllamaService, open_ai_service::OpenAiService};

/// Default fan-out when batch embedding has to loop single-input calls.
const DEFAULT_EMBED_CONCURRENCY: usize = 4;

/// Shared service managing the **completion** and **embedding** profiles.
///
/// Internally caches Ollama/OpenAI clients keyed by their configuration to
/// avoid recreating HTTP clients on each call.
pub struct LlmServiceProfiles {
    completion: LlmModelConfig,
    embedding: LlmModelConfig,
    embed_concurrency: usize,

    ollama: RwLock<HashMap<ClientKey, Arc<OllamaService>>>,
    openai: RwLock<HashMap<ClientKey, Arc<OpenAiService>>>,

    health: HealthService,
}

impl LlmServiceProfiles {
    /// Creates a new service with the two profiles.
    ///
    /// - `completion`: profile used for grounded answering.
    /// - `embedding`: profile used for vector retrieval.
    /// - `embed_concurrency`: optional fan-out bound for looped batch
    ///   embedding (defaults to 4; only relevant for providers without a
    ///   batch endpoint).
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if the health checker cannot be constructed.
    pub fn new(
        completion: LlmModelConfig,
        embedding: LlmModelConfig,
        embed_concurrency: Option<usize>,
    ) -> Result<Self, AiLlmError> {
        Ok(Self {
            completion,
            embedding,
            embed_concurrency: embed_concurrency
                .unwrap_or(DEFAULT_EMBED_CONCURRENCY)
                .max(1),
            ollama: RwLock::new(HashMap::new()),
            openai: RwLock::new(HashMap::new()),
            health: HealthService::new(None)?,
        })
    }

    /// Runs a grounded completion through the **completion** profile.
    ///
    /// Never fails: transport errors, non-2xx statuses and unrecognized
    /// payload shapes are folded into [`CompletionOutcome::Degraded`] with a
    /// bounded description. One attempt, no retries.
    pub async fn complete(&self, prompt: &str, system: Option<&str>) -> CompletionOutcome {
        let raw = match self.completion.provider {
            LlmProvider::Ollama => match self.get_or_init_ollama(&self.completion).await {
                Ok(cli) => cli.generate(prompt, system).await,
                Err(e) => Err(e),
            },
            LlmProvider::OpenAI => match self.get_or_init_openai(&self.completion).await {
                Ok(cli) => cli.chat_completion(prompt, system).await,
                Err(e) => Err(e),
            },
        };

        match raw {
            Ok(payload) => normalize::completion_text(&payload),
            Err(err) => {
                warn!(error = %err, "completion request failed; degrading to diagnostic text");
                CompletionOutcome::Degraded(format!("[completion error] {err}"))
            }
        }
    }

    /// Computes embeddings for a batch of inputs using the **embedding**
    /// profile. One vector per input, same order, all-or-nothing.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if the backend is unreachable or answers with
    /// an unexpected payload; no partial results are returned.
    pub async fn embed_batch(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, AiLlmError> {
        if inputs.is_empty() {
            return Ok(Vec::new());
        }
        match self.embedding.provider {
            LlmProvider::Ollama => {
                let cli = self.get_or_init_ollama(&self.embedding).await?;
                cli.embeddings_batch(inputs, self.embed_concurrency).await
            }
            LlmProvider::OpenAI => {
                let cli = self.get_or_init_openai(&self.embedding).await?;
                cli.embeddings_batch(inputs).await
            }
        }
    }

    /// Returns a health snapshot for the distinct profiles.
    ///
    /// If the embedding profile equals the completion profile, it is checked
    /// only once.
    pub async fn health_all(&self) -> Vec<HealthStatus> {
        let mut list = Vec::with_capacity(2);
        list.push(self.completion.clone());
        if self.embedding != self.completion {
            list.push(self.embedding.clone());
        }
        self.health.check_many(&list).await
    }

    /// Returns references to the `(completion, embedding)` profiles.
    pub fn profiles(&self) -> (&LlmModelConfig, &LlmModelConfig) {
        (&self.completion, &self.embedding)
    }

    /* --------------------- Internals --------------------- */

    async fn get_or_init_ollama(
        &self,
        cfg: &LlmModelConfig,
    ) -> Result<Arc<OllamaService>, AiLlmError> {
        let key = ClientKey::from(cfg);
        if let Some(cli) = self.ollama.read().await.get(&key).cloned() {
            return Ok(cli);
        }
        let cli = Arc::new(OllamaService::new(cfg.clone())?);
        let mut w = self.ollama.write().await;
        Ok(w.entry(key).or_insert(cli).clone())
    }

    async fn get_or_init_openai(
        &self,
        cfg: &LlmModelConfig,
    ) -> Result<Arc<OpenAiService>, AiLlmError> {
        let key = ClientKey::from(cfg);
        if let Some(cli) = self.openai.read().await.get(&key).cloned() {
            return Ok(cli);
        }
        let cli = Arc::new(OpenAiService::new(cfg.clone())?);
        let mut w = self.openai.write().await;
        Ok(w.entry(key).or_insert(cli).clone())
    }
}

/// Internal cache key identifying a unique client config.
#[derive(Clone, Eq)]
struct ClientKey {
    provider: LlmProvider,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    timeout: Option<u64>,
}

impl From<&LlmModelConfig> for ClientKey {
    fn from(cfg: &LlmModelConfig) -> Self {
        Self {
            provider: cfg.provider,
            endpoint: cfg.endpoint.clone(),
            model: cfg.model.clone(),
            api_key: cfg.api_key.clone(),
            timeout: cfg.timeout_secs,
        }
    }
}

impl PartialEq for ClientKey {
    fn eq(&self, other: &Self) -> bool {
        self.provider == other.provider
            && self.endpoint == other.endpoint
            && self.model == other.model
            && self.api_key == other.api_key
            && self.timeout == other.timeout
    }
}

impl Hash for ClientKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.provider.hash(state);
        self.endpoint.hash(state);
        self.model.hash(state);
        if let Some(ref k) = self.api_key {
            k.hash(state);
        } else {
            0usize.hash(state);
        }
        self.timeout.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(model: &str) -> LlmModelConfig {
        LlmModelConfig {
            provider: LlmProvider::Ollama,
            model: model.into(),
            endpoint: "http://localhost:11434".into(),
            api_key: None,
            max_tokens: None,
            temperature: Some(0.0),
            top_p: None,
            timeout_secs: Some(5),
        }
    }

    #[test]
    fn client_key_distinguishes_models() {
        let a = ClientKey::from(&cfg("model-a"));
        let b = ClientKey::from(&cfg("model-b"));
        let a2 = ClientKey::from(&cfg("model-a"));
        assert!(a != b);
        assert!(a == a2);
    }

    #[tokio::test]
    async fn unreachable_completion_degrades_instead_of_failing() {
        // Nothing listens on this port; the call must fold into Degraded.
        let mut completion = cfg("any-model");
        completion.endpoint = "http://127.0.0.1:1".into();
        completion.timeout_secs = Some(1);
        let svc = LlmServiceProfiles::new(completion, cfg("embed-model"), None).unwrap();

        let outcome = svc.complete("hello", None).await;
        assert!(outcome.is_degraded());
        assert!(outcome.into_text().contains("[completion error]"));
    }

    #[tokio::test]
    async fn unreachable_embedding_raises() {
        let mut embedding = cfg("embed-model");
        embedding.endpoint = "http://127.0.0.1:1".into();
        embedding.timeout_secs = Some(1);
        let svc = LlmServiceProfiles::new(cfg("any-model"), embedding, None).unwrap();

        let err = svc.embed_batch(&["x".to_string()]).await;
        assert!(err.is_err());
    }
}
