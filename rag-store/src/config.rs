//! Runtime configuration for chunking and retrieval.

use crate::errors::RagError;

/// Configuration for RAG ingestion and retrieval.
#[derive(Clone, Debug)]
pub struct RagConfig {
    /// Default collection name used when the caller does not pass one.
    pub collection: String,
    /// Chunk window size in characters.
    pub chunk_size: usize,
    /// Overlap between consecutive chunks in characters.
    pub chunk_overlap: usize,
    /// Default number of hits retrieved per question.
    pub top_k: usize,
    /// Per-hit text budget in the assembled prompt, in characters.
    pub preview_chars: usize,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            collection: "company_policy".into(),
            chunk_size: 1000,
            chunk_overlap: 200,
            top_k: 3,
            preview_chars: 1200,
        }
    }
}

impl RagConfig {
    /// Builds a config from environment variables, falling back to the
    /// documented defaults: `VECTOR_COLLECTION`, `CHUNK_SIZE`,
    /// `CHUNK_OVERLAP`, `TOP_K`, `ANSWER_PREVIEW_CHARS`.
    ///
    /// # Errors
    /// Returns `RagError::Config` when a set variable fails to parse or the
    /// combination is invalid.
    pub fn from_env() -> Result<Self, RagError> {
        let defaults = Self::default();
        let cfg = Self {
            collection: env_string("VECTOR_COLLECTION").unwrap_or(defaults.collection),
            chunk_size: env_usize("CHUNK_SIZE")?.unwrap_or(defaults.chunk_size),
            chunk_overlap: env_usize("CHUNK_OVERLAP")?.unwrap_or(defaults.chunk_overlap),
            top_k: env_usize("TOP_K")?.unwrap_or(defaults.top_k),
            preview_chars: env_usize("ANSWER_PREVIEW_CHARS")?.unwrap_or(defaults.preview_chars),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validates config values.
    ///
    /// # Errors
    /// Returns `RagError::Config` describing the first violated constraint.
    pub fn validate(&self) -> Result<(), RagError> {
        if self.collection.trim().is_empty() {
            return Err(RagError::Config("collection is empty".into()));
        }
        if self.chunk_size == 0 {
            return Err(RagError::Config("chunk_size must be > 0".into()));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(RagError::Config(
                "chunk_overlap must be smaller than chunk_size".into(),
            ));
        }
        if self.top_k == 0 {
            return Err(RagError::Config("top_k must be > 0".into()));
        }
        if self.preview_chars == 0 {
            return Err(RagError::Config("preview_chars must be > 0".into()));
        }
        Ok(())
    }
}

fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn env_usize(name: &str) -> Result<Option<usize>, RagError> {
    match env_string(name) {
        Some(v) => v
            .parse::<usize>()
            .map(Some)
            .map_err(|_| RagError::Config(format!("{name} must be a non-negative integer"))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        RagConfig::default().validate().unwrap();
    }

    #[test]
    fn rejects_zero_chunk_size() {
        let cfg = RagConfig {
            chunk_size: 0,
            ..RagConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_overlap_not_smaller_than_size() {
        let cfg = RagConfig {
            chunk_size: 100,
            chunk_overlap: 100,
            ..RagConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_empty_collection() {
        let cfg = RagConfig {
            collection: "  ".into(),
            ..RagConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
