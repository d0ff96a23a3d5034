//! Unified error types for the crate.

use thiserror::Error;

/// Result alias for vector-store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by collection builds and searches.
#[derive(Debug, Error)]
pub enum Error {
    /// The referenced collection has never been built.
    #[error("collection not found: {0}")]
    CollectionNotFound(String),

    /// A rebuild was attempted with zero entries; an empty index cannot be
    /// queried meaningfully.
    #[error("cannot build empty index for collection: {0}")]
    EmptyIndex(String),

    /// Vector dimensionality differs from the collection dimension.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}
