/// The backend used for LLM inference.
///
/// `OpenAI` covers every OpenAI-compatible chat/embeddings API (OpenAI
/// itself, Groq, OpenRouter, vLLM gateways); `Ollama` is the local runtime
/// with its own request shapes. Adding a provider means extending this enum
/// and wiring a service in `services/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    /// Local Ollama runtime for on-device inference.
    Ollama,
    /// OpenAI-compatible chat completions API (OpenAI, Groq, ...).
    OpenAI,
}
