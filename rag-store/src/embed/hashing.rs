//! Deterministic offline embedder.
//!
//! Bag-of-tokens embedding: lowercase alphanumeric tokens are hashed with
//! `blake3` into a fixed number of buckets and the bucket counts are
//! L2-normalized. Cosine similarity between two such vectors grows with
//! shared vocabulary, which is enough for development without a model
//! server and for deterministic pipeline tests. Not a semantic embedding.

use std::{future::Future, pin::Pin};

use crate::embed::EmbeddingsProvider;
use crate::errors::RagError;

/// Default vector dimension; large enough to keep token collisions rare for
/// document-sized vocabularies.
const DEFAULT_DIMENSIONS: usize = 4096;

/// Hash-bucket embedder with a fixed output dimension.
#[derive(Clone, Debug)]
pub struct HashEmbedder {
    dimensions: usize,
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSIONS)
    }
}

impl HashEmbedder {
    /// Creates an embedder producing vectors of `dimensions` components.
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    /// Output dimension of every produced vector.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];

        for token in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let token = token.to_lowercase();
            let digest = blake3::hash(token.as_bytes());
            let bytes = digest.as_bytes();
            let bucket = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize
                % self.dimensions;
            vector[bucket] += 1.0;
        }

        let norm = vector.iter().map(|v| f64::from(*v) * f64::from(*v)).sum::<f64>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v = (f64::from(*v) / norm) as f32;
            }
        }
        vector
    }
}

impl EmbeddingsProvider for HashEmbedder {
    fn embed_batch<'a>(
        &'a self,
        texts: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Vec<f32>>, RagError>> + Send + 'a>> {
        Box::pin(async move { Ok(texts.iter().map(|t| self.embed_one(t)).collect()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vector_store::distance::cosine_similarity;

    fn embed(embedder: &HashEmbedder, text: &str) -> Vec<f32> {
        embedder.embed_one(text)
    }

    #[test]
    fn output_is_deterministic_and_fixed_dimension() {
        let embedder = HashEmbedder::new(512);
        let a = embed(&embedder, "vacation days per year");
        let b = embed(&embedder, "vacation days per year");
        assert_eq!(a, b);
        assert_eq!(a.len(), 512);
    }

    #[test]
    fn identical_texts_have_unit_similarity() {
        let embedder = HashEmbedder::default();
        let a = embed(&embedder, "Sick leave: 10 days per year.");
        let s = cosine_similarity(&a, &a);
        assert!((s - 1.0).abs() < 1e-5);
    }

    #[test]
    fn shared_vocabulary_scores_higher() {
        let embedder = HashEmbedder::default();
        let query = embed(&embedder, "How many vacation days?");
        let vacation = embed(&embedder, "Vacation policy: 20 days per year.");
        let sick = embed(&embedder, "Sick leave: 10 days per year.");

        let s_vacation = cosine_similarity(&query, &vacation);
        let s_sick = cosine_similarity(&query, &sick);
        assert!(
            s_vacation > s_sick,
            "vacation={s_vacation} sick={s_sick}"
        );
    }

    #[test]
    fn tokenization_ignores_case_and_punctuation() {
        let embedder = HashEmbedder::default();
        let a = embed(&embedder, "VACATION, policy!");
        let b = embed(&embedder, "vacation policy");
        let s = cosine_similarity(&a, &b);
        assert!((s - 1.0).abs() < 1e-5);
    }

    #[test]
    fn empty_text_embeds_to_zero_vector() {
        let embedder = HashEmbedder::new(64);
        let v = embed(&embedder, "   ");
        assert!(v.iter().all(|&x| x == 0.0));
    }
}
