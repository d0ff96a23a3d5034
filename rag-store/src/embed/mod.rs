//! Embedding provider seam.
//!
//! Implement [`EmbeddingsProvider`] to plug in an embedding backend. The
//! trait is batch-first: real providers amortize model overhead across a
//! list of inputs, and the pipeline embeds every chunk of a document in one
//! call.

use std::{future::Future, pin::Pin};

use crate::errors::RagError;

/// Provider interface for embedding generation.
///
/// Contract: one vector per input, same order, fixed dimension per provider
/// instance, deterministic output for deterministic input, and
/// all-or-nothing failure (no partial batches).
pub trait EmbeddingsProvider: Send + Sync {
    /// Embeds a batch of texts.
    fn embed_batch<'a>(
        &'a self,
        texts: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Vec<f32>>, RagError>> + Send + 'a>>;
}

pub mod hashing;
pub mod llm;

pub use hashing::HashEmbedder;
pub use llm::LlmEmbedder;
