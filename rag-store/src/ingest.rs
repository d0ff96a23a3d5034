//! Build path: document text → chunks → vectors → collection rebuild.

use serde_json::Value;
use tracing::info;
use vector_store::{DistanceKind, VectorDb};

use crate::chunker::chunk_text;
use crate::config::RagConfig;
use crate::embed::EmbeddingsProvider;
use crate::errors::RagError;
use crate::record::ChunkPayload;

/// Chunks, embeds and indexes one document, replacing the named collection
/// wholesale. Returns the collection id on success.
///
/// # Errors
/// - [`RagError::NoChunks`] for an empty or whitespace-only document
/// - [`RagError::EmbeddingUnavailable`] when the embedder fails
/// - index errors from the rebuild (`EmptyIndex` cannot happen here since a
///   non-empty chunk list produces a non-empty entry list)
pub async fn run(
    embedder: &dyn EmbeddingsProvider,
    index: &VectorDb,
    cfg: &RagConfig,
    document_text: &str,
    collection: &str,
) -> Result<String, RagError> {
    let chunks = chunk_text(document_text, cfg.chunk_size, cfg.chunk_overlap)?;
    if chunks.is_empty() {
        return Err(RagError::NoChunks);
    }

    let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
    let vectors = embedder.embed_batch(&texts).await?;

    let entries: Vec<(Vec<f32>, Value)> = vectors
        .into_iter()
        .zip(chunks.iter())
        .map(|(vector, chunk)| {
            let payload = serde_json::to_value(ChunkPayload::from(chunk))
                .map_err(|e| RagError::Config(format!("payload serialization failed: {e}")))?;
            Ok((vector, payload))
        })
        .collect::<Result<_, RagError>>()?;

    let dimensions = entries.first().map(|(v, _)| v.len()).unwrap_or(0);
    index.rebuild(collection, DistanceKind::Cosine, entries)?;

    info!(
        collection,
        chunks = chunks.len(),
        dimensions,
        "document ingested"
    );
    Ok(collection.to_string())
}
