//! Embedding provider backed by the shared LLM service.

use std::sync::Arc;
use std::{future::Future, pin::Pin};

use ai_llm_service::service_profiles::LlmServiceProfiles;

use crate::embed::EmbeddingsProvider;
use crate::errors::RagError;

/// Embeddings via the service's **embedding** profile (Ollama or an
/// OpenAI-compatible endpoint).
#[derive(Clone)]
pub struct LlmEmbedder {
    svc: Arc<LlmServiceProfiles>,
    /// Declared dimension; when set, every returned vector is checked
    /// against it so a misconfigured model fails loudly at ingest time
    /// rather than corrupting a collection.
    dim: Option<usize>,
}

impl LlmEmbedder {
    /// Constructs an embedder over the shared service.
    pub fn new(svc: Arc<LlmServiceProfiles>, dim: Option<usize>) -> Self {
        Self { svc, dim }
    }
}

impl EmbeddingsProvider for LlmEmbedder {
    fn embed_batch<'a>(
        &'a self,
        texts: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Vec<f32>>, RagError>> + Send + 'a>> {
        Box::pin(async move {
            let vectors = self
                .svc
                .embed_batch(texts)
                .await
                .map_err(|e| RagError::EmbeddingUnavailable(e.to_string()))?;

            if let Some(want) = self.dim {
                for v in &vectors {
                    if v.len() != want {
                        return Err(RagError::VectorSizeMismatch { got: v.len(), want });
                    }
                }
            }

            Ok(vectors)
        })
    }
}
