//! Completion provider seam.
//!
//! The pipeline talks to the completion endpoint through this trait so tests
//! and offline runs can inject a scripted provider. Implementations never
//! fail: transport and shape problems arrive as
//! [`CompletionOutcome::Degraded`], and the pipeline folds them into the
//! answer text.

use std::sync::Arc;
use std::{future::Future, pin::Pin};

use ai_llm_service::normalize::CompletionOutcome;
use ai_llm_service::service_profiles::LlmServiceProfiles;

/// Fixed instruction sent with every completion request; keeps the model
/// grounded in the supplied context.
pub const SYSTEM_INSTRUCTION: &str =
    "You are an assistant that answers using only provided context.";

/// Provider interface for grounded completion.
pub trait CompletionProvider: Send + Sync {
    /// Sends the assembled prompt and returns the (possibly degraded)
    /// outcome. One attempt, no retries.
    fn complete<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = CompletionOutcome> + Send + 'a>>;
}

/// Completion via the shared LLM service's **completion** profile.
#[derive(Clone)]
pub struct LlmCompletion {
    svc: Arc<LlmServiceProfiles>,
}

impl LlmCompletion {
    /// Constructs a completion provider over the shared service.
    pub fn new(svc: Arc<LlmServiceProfiles>) -> Self {
        Self { svc }
    }
}

impl CompletionProvider for LlmCompletion {
    fn complete<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = CompletionOutcome> + Send + 'a>> {
        Box::pin(async move { self.svc.complete(prompt, Some(SYSTEM_INSTRUCTION)).await })
    }
}
