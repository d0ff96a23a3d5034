//! Unified error types for the crate.
//!
//! Completion-endpoint failures are deliberately absent here: they degrade
//! into the returned answer text (see [`crate::complete`]), so `ask` only
//! fails when the retrieval stage fails.

use thiserror::Error;

/// Top-level error for rag-store operations.
#[derive(Debug, Error)]
pub enum RagError {
    /// Malformed chunking parameters; a caller bug, not a data problem.
    #[error("chunking error: {0}")]
    Chunking(String),

    /// The document produced zero chunks (e.g. empty or whitespace-only).
    #[error("document produced no chunks")]
    NoChunks,

    /// The embedding backend failed or is unreachable; not retried here.
    #[error("embedding backend unavailable: {0}")]
    EmbeddingUnavailable(String),

    /// Mismatch between a produced vector and the declared dimension.
    #[error("vector size mismatch: got {got}, want {want}")]
    VectorSizeMismatch { got: usize, want: usize },

    /// Index-level failures (empty build, unknown collection, dimension
    /// mismatch inside the store).
    #[error(transparent)]
    Index(#[from] vector_store::Error),

    /// Invalid or unsupported runtime configuration.
    #[error("config error: {0}")]
    Config(String),
}
