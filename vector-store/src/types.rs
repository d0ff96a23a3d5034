//! Core data models stored in and returned by collections.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A stored vector with its JSON payload.
///
/// Ids are assigned densely from 0 in rebuild input order and are unique
/// within one collection.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IndexedEntry {
    pub id: u64,
    pub vector: Vec<f32>,
    pub payload: Value,
}

/// A single search hit. Hits are returned best-first; equal scores are
/// ordered by ascending id so results are reproducible.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: u64,
    pub score: f32,
    pub payload: Value,
}
