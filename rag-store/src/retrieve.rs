//! Query path: question → vector → index search → grounded answer.

use tracing::{debug, warn};
use vector_store::VectorDb;

use crate::complete::CompletionProvider;
use crate::config::RagConfig;
use crate::embed::EmbeddingsProvider;
use crate::errors::RagError;
use crate::prompt::build_prompt;
use crate::record::{AnswerResult, ChunkPayload, RetrievalHit};

/// Embeds the question, searches the collection and asks the completion
/// provider for a grounded answer.
///
/// Retrieval-stage failures (embedding, index) raise; completion failures
/// arrive as a degraded outcome and are folded into the answer string, so a
/// down completion provider still yields an `AnswerResult`.
///
/// # Errors
/// - [`RagError::EmbeddingUnavailable`] when the question cannot be embedded
/// - [`vector_store::Error::CollectionNotFound`] for an unbuilt collection
/// - [`vector_store::Error::DimensionMismatch`] when the embedder disagrees
///   with the collection dimension
pub async fn run(
    embedder: &dyn EmbeddingsProvider,
    completion: &dyn CompletionProvider,
    index: &VectorDb,
    cfg: &RagConfig,
    question: &str,
    collection: &str,
    top_k: Option<usize>,
) -> Result<AnswerResult, RagError> {
    let question_texts = [question.to_string()];
    let mut vectors = embedder.embed_batch(&question_texts).await?;
    let query_vector = vectors
        .pop()
        .ok_or_else(|| RagError::EmbeddingUnavailable("empty embedding batch".into()))?;

    let limit = top_k.unwrap_or(cfg.top_k);
    let hits = index.search(collection, &query_vector, limit)?;
    debug!(collection, hits = hits.len(), limit, "retrieved context");

    let retrieved: Vec<RetrievalHit> = hits
        .into_iter()
        .map(|hit| RetrievalHit {
            score: hit.score,
            payload: ChunkPayload::from_value(hit.payload),
        })
        .collect();

    let prompt = build_prompt(question, &retrieved, cfg.preview_chars);
    let outcome = completion.complete(&prompt).await;
    if outcome.is_degraded() {
        warn!(collection, "completion degraded; returning diagnostic text as answer");
    }

    Ok(AnswerResult {
        answer: outcome.into_text(),
        retrieved,
    })
}
