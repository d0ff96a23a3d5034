//! Grounded prompt assembly.
//!
//! Each retrieved chunk becomes a labeled context block carrying its
//! character span; blocks are concatenated between a fixed instruction and
//! the user question. Per-hit text is truncated to a configured budget so a
//! few large chunks cannot blow up the prompt.

use crate::record::RetrievalHit;

/// Renders one retrieval hit as a context block. The span label lets the
/// model (and the reader of the answer) cite which slice it used.
fn context_block(hit: &RetrievalHit, preview_chars: usize) -> String {
    format!(
        "---\n[chars {}..{}]\n{}\n",
        hit.payload.metadata.start_char,
        hit.payload.metadata.end_char,
        truncate_chars(&hit.payload.text, preview_chars),
    )
}

/// Builds the final grounded prompt from the question and ranked hits.
pub fn build_prompt(question: &str, hits: &[RetrievalHit], preview_chars: usize) -> String {
    let context: Vec<String> = hits
        .iter()
        .map(|hit| context_block(hit, preview_chars))
        .collect();

    format!(
        "You are a company policy assistant. Use ONLY the provided context to answer.\n\n\
         CONTEXT:\n{}\n\nQUESTION:\n{}\n\n\
         Answer succinctly and indicate which context slices you used.",
        context.join("\n"),
        question,
    )
}

/// Character-safe truncation; chunk text may contain multi-byte characters.
fn truncate_chars(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        s.chars().take(max_chars).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{ChunkPayload, ChunkSpan};

    fn hit(text: &str, start: usize, end: usize) -> RetrievalHit {
        RetrievalHit {
            score: 0.9,
            payload: ChunkPayload {
                text: text.into(),
                metadata: ChunkSpan {
                    start_char: start,
                    end_char: end,
                },
            },
        }
    }

    #[test]
    fn prompt_carries_instruction_context_and_question() {
        let prompt = build_prompt(
            "How many vacation days?",
            &[hit("Vacation policy: 20 days per year.", 0, 40)],
            1200,
        );
        assert!(prompt.starts_with("You are a company policy assistant."));
        assert!(prompt.contains("CONTEXT:"));
        assert!(prompt.contains("[chars 0..40]"));
        assert!(prompt.contains("Vacation policy"));
        assert!(prompt.contains("QUESTION:\nHow many vacation days?"));
    }

    #[test]
    fn hits_appear_in_rank_order() {
        let prompt = build_prompt(
            "q",
            &[hit("first block", 0, 10), hit("second block", 10, 20)],
            1200,
        );
        let first = prompt.find("first block").unwrap();
        let second = prompt.find("second block").unwrap();
        assert!(first < second);
    }

    #[test]
    fn per_hit_text_is_truncated_to_preview_budget() {
        let long = "x".repeat(5000);
        let prompt = build_prompt("q", &[hit(&long, 0, 5000)], 100);
        assert!(!prompt.contains(&"x".repeat(101)));
        assert!(prompt.contains(&"x".repeat(100)));
    }
}
