//! Overlapping fixed-size chunking with character-offset metadata.
//!
//! Goals:
//! - Produce stable, overlapping character windows with correct spans.
//! - Guarantee forward progress and termination for every parameter
//!   combination, including `overlap >= size`.
//! - Stay pure and deterministic: same input, same output.

use tracing::debug;

use crate::errors::RagError;
use crate::record::{Chunk, ChunkSpan};

/// Splits `text` into overlapping windows of at most `size` characters.
///
/// Each chunk covers `[start, min(start + size, len))` in character offsets;
/// window text is whitespace-trimmed and windows that trim to nothing are
/// dropped. The scan stops after the window that reaches the end of the
/// document. Otherwise the next window starts at `end - overlap`; when that
/// would stall or move backwards (`overlap >= size`), it starts at `end`
/// instead, so the scan always advances.
///
/// # Errors
/// Returns [`RagError::Chunking`] when `size == 0`.
pub fn chunk_text(text: &str, size: usize, overlap: usize) -> Result<Vec<Chunk>, RagError> {
    if size == 0 {
        return Err(RagError::Chunking("chunk size must be > 0".into()));
    }

    // Character-addressed view; spans are character offsets, not bytes.
    let chars: Vec<char> = text.chars().collect();
    let total = chars.len();

    let mut out = Vec::new();
    let mut start = 0usize;

    while start < total {
        let end = (start + size).min(total);

        let window: String = chars[start..end].iter().collect();
        let trimmed = window.trim();
        if !trimmed.is_empty() {
            out.push(Chunk {
                text: trimmed.to_string(),
                span: ChunkSpan {
                    start_char: start,
                    end_char: end,
                },
            });
        }

        if end == total {
            break;
        }
        let next = end.saturating_sub(overlap);
        start = if next > start { next } else { end };
    }

    debug!(
        chunks = out.len(),
        size, overlap, total, "chunked document"
    );
    Ok(out)
}
