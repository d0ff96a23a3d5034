//! Shared LLM service for the policy assistant backend.
//!
//! Two logical profiles are managed by [`service_profiles::LlmServiceProfiles`]:
//!
//! - **completion** — grounded question answering against a chat/generate
//!   endpoint (Ollama local API, or OpenAI-compatible remote APIs such as
//!   Groq).
//! - **embedding**  — batch embedding retrieval for indexing and querying.
//!
//! Completion replies arrive in more than one JSON shape depending on the
//! provider and API generation; [`normalize`] probes the known shapes and
//! folds transport failures into a typed, degraded-but-stringly outcome so
//! callers always end up with displayable text.

pub mod config;
pub mod error_handler;
pub mod health_service;
pub mod normalize;
pub mod service_profiles;
pub mod services;
pub mod telemetry;

pub use config::llm_model_config::LlmModelConfig;
pub use config::llm_provider::LlmProvider;
pub use error_handler::{AiLlmError, Result};
pub use normalize::CompletionOutcome;
pub use service_profiles::LlmServiceProfiles;
