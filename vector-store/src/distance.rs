//! Similarity scoring between vectors.

use serde::{Deserialize, Serialize};

/// Similarity function used for the vector space of a collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceKind {
    /// Cosine similarity (recommended for most embeddings).
    Cosine,
    /// Dot product (useful for pre-normalized vectors).
    Dot,
}

/// Scores `query` against `candidate` with the given similarity function.
/// Higher is more similar for both kinds.
pub fn score(kind: DistanceKind, query: &[f32], candidate: &[f32]) -> f32 {
    match kind {
        DistanceKind::Cosine => cosine_similarity(query, candidate),
        DistanceKind::Dot => dot_product(query, candidate),
    }
}

/// Exact cosine similarity with f64 accumulation.
///
/// Defined as 0.0 when either vector has zero norm, so callers never see
/// NaN scores.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (&x, &y) in a.iter().zip(b.iter()) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom <= f64::EPSILON {
        return 0.0;
    }
    (dot / denom) as f32
}

fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| f64::from(x) * f64::from(y))
        .sum::<f64>() as f32
}
