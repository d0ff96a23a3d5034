//! Embedded vector collections with exact nearest-neighbor search.
//!
//! This crate holds named collections of `(vector, payload)` entries in
//! process memory. A collection is rebuilt wholesale on each document
//! ingestion and queried with exact cosine similarity, which keeps scores and
//! orderings fully deterministic (ties break by insertion id).
//!
//! Rebuilds are copy-on-write: the replacement snapshot is constructed
//! outside the lock and swapped in atomically, so concurrent searches either
//! see the previous complete collection or the new one, never a partial
//! state. Searches against different collections never contend.

pub mod collection;
pub mod distance;
pub mod error;
pub mod types;

pub use collection::Collection;
pub use distance::DistanceKind;
pub use error::{Error, Result};
pub use types::{IndexedEntry, SearchHit};

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use tracing::{debug, info};

/// Thread-safe map of named collections.
///
/// Cheap to clone; clones share the same underlying store.
#[derive(Clone, Default)]
pub struct VectorDb {
    inner: Arc<RwLock<HashMap<String, Arc<Collection>>>>,
}

impl VectorDb {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the entire content of `name` with `entries`, assigning ids
    /// `0..entries.len()` in input order.
    ///
    /// The snapshot is built before the write lock is taken; in-flight
    /// searches keep reading the previous snapshot until the swap.
    ///
    /// # Errors
    /// - [`Error::EmptyIndex`] if `entries` is empty
    /// - [`Error::DimensionMismatch`] if the vectors disagree on dimension
    pub fn rebuild(
        &self,
        name: &str,
        metric: DistanceKind,
        entries: Vec<(Vec<f32>, Value)>,
    ) -> Result<()> {
        let collection = Collection::build(name.to_string(), metric, entries)?;
        info!(
            collection = name,
            dimensions = collection.dimensions(),
            entries = collection.len(),
            "rebuilt collection"
        );
        self.inner
            .write()
            .insert(name.to_string(), Arc::new(collection));
        Ok(())
    }

    /// Searches `name` for the `limit` entries most similar to `query`.
    ///
    /// # Errors
    /// - [`Error::CollectionNotFound`] if `name` has never been built
    /// - [`Error::DimensionMismatch`] if the query dimension is wrong
    pub fn search(&self, name: &str, query: &[f32], limit: usize) -> Result<Vec<SearchHit>> {
        let collection = self.get(name)?;
        let hits = collection.search(query, limit)?;
        debug!(collection = name, hits = hits.len(), "search completed");
        Ok(hits)
    }

    /// Returns the current snapshot of a collection.
    ///
    /// # Errors
    /// [`Error::CollectionNotFound`] if `name` has never been built.
    pub fn get(&self, name: &str) -> Result<Arc<Collection>> {
        self.inner
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| Error::CollectionNotFound(name.to_string()))
    }

    /// True when `name` has been built at least once.
    pub fn collection_exists(&self, name: &str) -> bool {
        self.inner.read().contains_key(name)
    }

    /// Names of all built collections, unordered.
    pub fn list_collections(&self) -> Vec<String> {
        self.inner.read().keys().cloned().collect()
    }

    /// Vector dimension of a built collection.
    ///
    /// # Errors
    /// [`Error::CollectionNotFound`] if `name` has never been built.
    pub fn dimensions(&self, name: &str) -> Result<usize> {
        Ok(self.get(name)?.dimensions())
    }

    /// Entry count of a built collection.
    ///
    /// # Errors
    /// [`Error::CollectionNotFound`] if `name` has never been built.
    pub fn len(&self, name: &str) -> Result<usize> {
        Ok(self.get(name)?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(v: &[f32], tag: &str) -> (Vec<f32>, Value) {
        (v.to_vec(), json!({ "tag": tag }))
    }

    #[test]
    fn rebuild_then_search_returns_identity_first() {
        let db = VectorDb::new();
        db.rebuild(
            "docs",
            DistanceKind::Cosine,
            vec![
                entry(&[1.0, 0.0, 0.0], "a"),
                entry(&[0.0, 1.0, 0.0], "b"),
                entry(&[0.9, 0.1, 0.0], "c"),
            ],
        )
        .unwrap();

        let hits = db.search("docs", &[0.0, 1.0, 0.0], 3).unwrap();
        assert_eq!(hits[0].id, 1);
        assert_eq!(hits[0].payload, json!({ "tag": "b" }));
        assert!((hits[0].score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn rebuild_rejects_empty_entries() {
        let db = VectorDb::new();
        let err = db
            .rebuild("docs", DistanceKind::Cosine, vec![])
            .unwrap_err();
        assert!(matches!(err, Error::EmptyIndex(_)));
        // A failed rebuild must not create the collection.
        assert!(!db.collection_exists("docs"));
    }

    #[test]
    fn search_on_unbuilt_collection_is_not_found() {
        let db = VectorDb::new();
        let err = db.search("missing", &[1.0], 1).unwrap_err();
        assert!(matches!(err, Error::CollectionNotFound(name) if name == "missing"));
    }

    #[test]
    fn failed_rebuild_keeps_previous_snapshot() {
        let db = VectorDb::new();
        db.rebuild(
            "docs",
            DistanceKind::Cosine,
            vec![entry(&[1.0, 0.0], "old")],
        )
        .unwrap();

        let err = db
            .rebuild(
                "docs",
                DistanceKind::Cosine,
                vec![entry(&[1.0, 0.0], "new"), entry(&[1.0, 0.0, 0.0], "bad")],
            )
            .unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch { .. }));

        let hits = db.search("docs", &[1.0, 0.0], 1).unwrap();
        assert_eq!(hits[0].payload, json!({ "tag": "old" }));
    }

    #[test]
    fn rebuild_replaces_wholesale() {
        let db = VectorDb::new();
        db.rebuild(
            "docs",
            DistanceKind::Cosine,
            vec![entry(&[1.0, 0.0], "old-a"), entry(&[0.0, 1.0], "old-b")],
        )
        .unwrap();
        db.rebuild(
            "docs",
            DistanceKind::Cosine,
            vec![entry(&[0.5, 0.5], "new")],
        )
        .unwrap();

        assert_eq!(db.len("docs").unwrap(), 1);
        let hits = db.search("docs", &[1.0, 0.0], 10).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].payload, json!({ "tag": "new" }));
    }

    #[test]
    fn identical_rebuilds_are_deterministic() {
        let db = VectorDb::new();
        let build = |db: &VectorDb| {
            db.rebuild(
                "docs",
                DistanceKind::Cosine,
                vec![
                    entry(&[0.2, 0.8], "a"),
                    entry(&[0.7, 0.3], "b"),
                    entry(&[0.5, 0.5], "c"),
                ],
            )
            .unwrap();
        };

        build(&db);
        let first = db.search("docs", &[0.6, 0.4], 3).unwrap();
        build(&db);
        let second = db.search("docs", &[0.6, 0.4], 3).unwrap();

        let pairs: Vec<(u64, f32)> = first.iter().map(|h| (h.id, h.score)).collect();
        let pairs2: Vec<(u64, f32)> = second.iter().map(|h| (h.id, h.score)).collect();
        assert_eq!(pairs, pairs2);
    }

    #[test]
    fn collections_are_independent() {
        let db = VectorDb::new();
        db.rebuild("a", DistanceKind::Cosine, vec![entry(&[1.0, 0.0], "a")])
            .unwrap();
        db.rebuild("b", DistanceKind::Cosine, vec![entry(&[1.0], "b")])
            .unwrap();

        assert_eq!(db.dimensions("a").unwrap(), 2);
        assert_eq!(db.dimensions("b").unwrap(), 1);
        let mut names = db.list_collections();
        names.sort();
        assert_eq!(names, vec!["a", "b"]);
    }
}
