//! High-level RAG facade: ingestion + retrieval over the embedded vector
//! store.
//!
//! This crate provides a clean API to:
//! - chunk and index policy document text into a named collection
//! - answer a question with context retrieved from that collection
//!
//! The design is flat (no deep nesting) and splits responsibilities into
//! focused modules. All collaborators are injected: the embedding provider,
//! the completion provider and the vector store arrive as constructor
//! arguments, which keeps tests hermetic and lets concurrent pipelines serve
//! different collections without shared globals.

mod chunker;
mod config;
mod errors;
mod ingest;
mod prompt;
mod record;
mod retrieve;

pub mod complete;
pub mod embed;

pub use chunker::chunk_text;
pub use complete::{CompletionProvider, LlmCompletion, SYSTEM_INSTRUCTION};
pub use config::RagConfig;
pub use embed::{EmbeddingsProvider, HashEmbedder, LlmEmbedder};
pub use errors::RagError;
pub use record::{AnswerResult, Chunk, ChunkPayload, ChunkSpan, RetrievalHit};

use std::sync::Arc;

use tracing::trace;
use vector_store::VectorDb;

/// The retrieval-augmented answer pipeline.
///
/// Holds no state beyond its injected collaborators; collection identifiers
/// are opaque strings passed into every call, so one pipeline instance can
/// serve any number of collections concurrently.
pub struct RagPipeline {
    embedder: Arc<dyn EmbeddingsProvider>,
    completion: Arc<dyn CompletionProvider>,
    index: VectorDb,
    cfg: RagConfig,
}

impl RagPipeline {
    /// Constructs a pipeline from its collaborators.
    ///
    /// # Errors
    /// Returns `RagError::Config` if `cfg` fails validation.
    pub fn new(
        embedder: Arc<dyn EmbeddingsProvider>,
        completion: Arc<dyn CompletionProvider>,
        index: VectorDb,
        cfg: RagConfig,
    ) -> Result<Self, RagError> {
        cfg.validate()?;
        Ok(Self {
            embedder,
            completion,
            index,
            cfg,
        })
    }

    /// Chunks, embeds and indexes one document, replacing `collection`
    /// wholesale. Returns the collection id.
    ///
    /// # Errors
    /// See [`RagError`]; notably [`RagError::NoChunks`] for an unusable
    /// document and [`RagError::EmbeddingUnavailable`] when the embedding
    /// backend is down.
    pub async fn ingest(&self, document_text: &str, collection: &str) -> Result<String, RagError> {
        trace!(collection, len = document_text.len(), "RagPipeline::ingest");
        ingest::run(
            self.embedder.as_ref(),
            &self.index,
            &self.cfg,
            document_text,
            collection,
        )
        .await
    }

    /// Answers a question against `collection`, retrieving `top_k` chunks
    /// (config default when `None`).
    ///
    /// Retrieval failures raise; completion failures degrade into the
    /// returned answer text.
    ///
    /// # Errors
    /// See [`RagError`]; notably `CollectionNotFound` when `collection` was
    /// never ingested.
    pub async fn ask(
        &self,
        question: &str,
        collection: &str,
        top_k: Option<usize>,
    ) -> Result<AnswerResult, RagError> {
        trace!(collection, top_k, "RagPipeline::ask");
        retrieve::run(
            self.embedder.as_ref(),
            self.completion.as_ref(),
            &self.index,
            &self.cfg,
            question,
            collection,
            top_k,
        )
        .await
    }

    /// The underlying vector store (introspection, e.g. collection listing).
    pub fn index(&self) -> &VectorDb {
        &self.index
    }

    /// The active configuration.
    pub fn config(&self) -> &RagConfig {
        &self.cfg
    }
}
