//! Core data models used by the pipeline.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Character span of a chunk within the source document. Offsets refer to
/// the untrimmed window, so consumers can slice the original text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkSpan {
    pub start_char: usize,
    pub end_char: usize,
}

/// A bounded span of document text produced by the chunker, in document
/// order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Chunk {
    /// Whitespace-trimmed window text; never empty.
    pub text: String,
    /// Untrimmed window offsets.
    pub span: ChunkSpan,
}

/// Payload stored with each indexed vector and returned with each hit.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChunkPayload {
    pub text: String,
    pub metadata: ChunkSpan,
}

impl ChunkPayload {
    /// Tolerant recovery from a raw index payload: a well-formed payload
    /// deserializes directly; anything else degrades to its `text` field (or
    /// empty text) with a zeroed span instead of failing the query.
    pub fn from_value(value: Value) -> Self {
        match serde_json::from_value::<ChunkPayload>(value.clone()) {
            Ok(payload) => payload,
            Err(_) => Self {
                text: value
                    .get("text")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                metadata: ChunkSpan::default(),
            },
        }
    }
}

impl From<&Chunk> for ChunkPayload {
    fn from(chunk: &Chunk) -> Self {
        Self {
            text: chunk.text.clone(),
            metadata: chunk.span,
        }
    }
}

/// A single retrieval hit with its similarity score, in rank order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RetrievalHit {
    pub score: f32,
    pub payload: ChunkPayload,
}

/// Terminal output of the answer pipeline. `retrieved` preserves the rank
/// order returned by the index.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnswerResult {
    pub answer: String,
    pub retrieved: Vec<RetrievalHit>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payload_round_trips_through_json() {
        let payload = ChunkPayload {
            text: "Vacation policy".into(),
            metadata: ChunkSpan {
                start_char: 0,
                end_char: 40,
            },
        };
        let value = serde_json::to_value(&payload).unwrap();
        let back = ChunkPayload::from_value(value);
        assert_eq!(back.text, "Vacation policy");
        assert_eq!(back.metadata.start_char, 0);
        assert_eq!(back.metadata.end_char, 40);
    }

    #[test]
    fn malformed_payload_degrades_to_text_field() {
        let back = ChunkPayload::from_value(json!({ "text": "orphan", "metadata": 7 }));
        assert_eq!(back.text, "orphan");
        assert_eq!(back.metadata, ChunkSpan::default());
    }
}
