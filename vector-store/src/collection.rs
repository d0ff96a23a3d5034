//! A named, immutable snapshot of indexed vectors.
//!
//! Collections are only ever created whole by [`crate::VectorDb::rebuild`];
//! searches run against the finished snapshot without further locking.

use serde_json::Value;

use crate::distance::{DistanceKind, score};
use crate::error::{Error, Result};
use crate::types::{IndexedEntry, SearchHit};

/// A fully built collection: fixed dimension, fixed similarity function,
/// entries with ids `0..len` in insertion order.
#[derive(Debug)]
pub struct Collection {
    name: String,
    dimensions: usize,
    metric: DistanceKind,
    entries: Vec<IndexedEntry>,
}

impl Collection {
    /// Builds a collection from `(vector, payload)` pairs in insertion order.
    ///
    /// The dimension of the collection is taken from the first vector.
    ///
    /// # Errors
    /// - [`Error::EmptyIndex`] if `pairs` is empty
    /// - [`Error::DimensionMismatch`] if any vector differs from the first
    pub(crate) fn build(
        name: String,
        metric: DistanceKind,
        pairs: Vec<(Vec<f32>, Value)>,
    ) -> Result<Self> {
        let Some(first) = pairs.first() else {
            return Err(Error::EmptyIndex(name));
        };
        let dimensions = first.0.len();

        let mut entries = Vec::with_capacity(pairs.len());
        for (id, (vector, payload)) in pairs.into_iter().enumerate() {
            if vector.len() != dimensions {
                return Err(Error::DimensionMismatch {
                    expected: dimensions,
                    got: vector.len(),
                });
            }
            entries.push(IndexedEntry {
                id: id as u64,
                vector,
                payload,
            });
        }

        Ok(Self {
            name,
            dimensions,
            metric,
            entries,
        })
    }

    /// Collection name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Vector dimensionality shared by every entry.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Similarity function used by [`Collection::search`].
    pub fn metric(&self) -> DistanceKind {
        self.metric
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the collection holds no entries. Never observed in practice
    /// since empty builds are rejected.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact nearest-neighbor search: scores every entry, returns at most
    /// `limit` hits ordered by descending score, ties by ascending id.
    ///
    /// # Errors
    /// [`Error::DimensionMismatch`] if the query dimension differs from the
    /// collection dimension.
    pub fn search(&self, query: &[f32], limit: usize) -> Result<Vec<SearchHit>> {
        if query.len() != self.dimensions {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions,
                got: query.len(),
            });
        }

        let mut ranked: Vec<(u64, f32)> = self
            .entries
            .iter()
            .map(|e| (e.id, score(self.metric, query, &e.vector)))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked.truncate(limit);

        // Entries are stored densely by id, so hits can be materialized by
        // direct indexing.
        Ok(ranked
            .into_iter()
            .map(|(id, score)| SearchHit {
                id,
                score,
                payload: self.entries[id as usize].payload.clone(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pairs(vectors: &[&[f32]]) -> Vec<(Vec<f32>, Value)> {
        vectors
            .iter()
            .enumerate()
            .map(|(i, v)| (v.to_vec(), json!({ "n": i })))
            .collect()
    }

    #[test]
    fn build_assigns_dense_ids_in_input_order() {
        let col = Collection::build(
            "test".into(),
            DistanceKind::Cosine,
            pairs(&[&[1.0, 0.0], &[0.0, 1.0], &[1.0, 1.0]]),
        )
        .unwrap();

        assert_eq!(col.len(), 3);
        assert_eq!(col.dimensions(), 2);

        let hits = col.search(&[1.0, 0.0], 10).unwrap();
        let ids: Vec<u64> = hits.iter().map(|h| h.id).collect();
        assert_eq!(ids[0], 0);
        assert_eq!(hits[0].payload, json!({ "n": 0 }));
    }

    #[test]
    fn build_rejects_empty_input() {
        let err = Collection::build("test".into(), DistanceKind::Cosine, vec![]).unwrap_err();
        assert!(matches!(err, Error::EmptyIndex(name) if name == "test"));
    }

    #[test]
    fn build_rejects_mixed_dimensions() {
        let err = Collection::build(
            "test".into(),
            DistanceKind::Cosine,
            pairs(&[&[1.0, 0.0], &[1.0, 0.0, 0.0]]),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch {
                expected: 2,
                got: 3
            }
        ));
    }

    #[test]
    fn search_rejects_wrong_query_dimension() {
        let col = Collection::build(
            "test".into(),
            DistanceKind::Cosine,
            pairs(&[&[1.0, 0.0]]),
        )
        .unwrap();
        let err = col.search(&[1.0, 0.0, 0.0], 1).unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch { .. }));
    }

    #[test]
    fn equal_scores_break_ties_by_ascending_id() {
        // Same direction, different magnitude: identical cosine scores.
        let col = Collection::build(
            "test".into(),
            DistanceKind::Cosine,
            pairs(&[&[2.0, 0.0], &[1.0, 0.0], &[4.0, 0.0]]),
        )
        .unwrap();

        let hits = col.search(&[1.0, 0.0], 10).unwrap();
        let ids: Vec<u64> = hits.iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn limit_caps_result_count() {
        let col = Collection::build(
            "test".into(),
            DistanceKind::Cosine,
            pairs(&[&[1.0, 0.0], &[0.0, 1.0]]),
        )
        .unwrap();
        assert_eq!(col.search(&[1.0, 0.0], 1).unwrap().len(), 1);
        assert_eq!(col.search(&[1.0, 0.0], 50).unwrap().len(), 2);
    }
}
