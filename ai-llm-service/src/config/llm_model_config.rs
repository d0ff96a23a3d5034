use crate::config::llm_provider::LlmProvider;

/// Configuration for one LLM endpoint (completion or embedding).
///
/// The same struct serves both roles; which options apply depends on the
/// provider and the call (embeddings ignore sampling parameters).
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    /// The LLM provider/backend.
    pub provider: LlmProvider,

    /// Model identifier string (e.g. `"llama3-8b-8192"`, `"nomic-embed-text"`).
    pub model: String,

    /// Inference endpoint base URL (local server or remote API).
    pub endpoint: String,

    /// Optional API key, sent as a bearer credential (OpenAI-compatible APIs).
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature.
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Request timeout in seconds; bounds every outbound call.
    pub timeout_secs: Option<u64>,
}
