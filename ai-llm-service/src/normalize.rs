//! Tolerant extraction of completion text from heterogeneous provider
//! payloads.
//!
//! Completion providers answer in more than one JSON shape depending on the
//! API generation: the OpenAI-style `choices[0].message.content`, the older
//! `choices[0].text`, Ollama's `{"response": "..."}`, and the
//! `response.output` / `response.outputs[0].text` family. The extraction
//! ladder here probes those shapes in a fixed priority order and returns the
//! first non-empty string; when the value found is itself a structured
//! object, its `content` or `text` field is taken, otherwise the value is
//! stringified.
//!
//! Nothing in this module raises: an unrecognized payload becomes a bounded
//! diagnostic string, and callers fold transport failures through
//! [`CompletionOutcome::Degraded`]. The pipeline decides whether a degraded
//! outcome is folded into the answer or handled otherwise.

use serde_json::Value;

/// Maximum characters of raw payload embedded in a diagnostic string.
const DIAGNOSTIC_PAYLOAD_CHARS: usize = 2000;

/// Outcome of a completion call.
///
/// `Text` carries the extracted completion; `Degraded` carries a bounded
/// human-readable description of what went wrong (transport failure,
/// non-2xx status, or an unrecognized payload shape). Both variants hold a
/// displayable string, so [`CompletionOutcome::into_text`] never fails.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// The provider answered and a completion was extracted.
    Text(String),
    /// The provider did not produce usable text; the payload describes why.
    Degraded(String),
}

impl CompletionOutcome {
    /// Folds the outcome into a plain string (the "always returns a string"
    /// contract of the answer pipeline).
    pub fn into_text(self) -> String {
        match self {
            CompletionOutcome::Text(s) | CompletionOutcome::Degraded(s) => s,
        }
    }

    /// True when the outcome is a degraded diagnostic rather than model text.
    pub fn is_degraded(&self) -> bool {
        matches!(self, CompletionOutcome::Degraded(_))
    }
}

/// Probes the known completion payload shapes in priority order.
///
/// Returns [`CompletionOutcome::Text`] on the first non-empty extraction and
/// a bounded `Unexpected response shape` diagnostic otherwise.
pub fn completion_text(payload: &Value) -> CompletionOutcome {
    if let Some(text) = from_choices(payload).or_else(|| from_response(payload)) {
        return CompletionOutcome::Text(text);
    }
    CompletionOutcome::Degraded(format!(
        "Unexpected response shape: {}",
        truncate_chars(&payload.to_string(), DIAGNOSTIC_PAYLOAD_CHARS)
    ))
}

/// OpenAI-style shape: `choices[0].message.content`, falling back to
/// `choices[0].delta.content` (streaming chunks) and `choices[0].text`
/// (legacy completions).
fn from_choices(payload: &Value) -> Option<String> {
    let choice = payload.get("choices")?.as_array()?.first()?;

    let from_message = choice
        .get("message")
        .or_else(|| choice.get("delta"))
        .and_then(|msg| msg.get("content").or_else(|| msg.get("text")));

    from_message
        .or_else(|| choice.get("text"))
        .and_then(value_to_text)
        .filter(|s| !s.is_empty())
}

/// `response`-style shape: a bare string (`Ollama /api/generate`), or an
/// object carrying `output`/`text`, or `outputs[0].text|content`.
fn from_response(payload: &Value) -> Option<String> {
    let response = payload.get("response")?;

    if let Some(s) = response.as_str() {
        return Some(s.to_string()).filter(|s| !s.is_empty());
    }

    let direct = response
        .get("output")
        .or_else(|| response.get("text"))
        .and_then(value_to_text)
        .filter(|s| !s.is_empty());
    if direct.is_some() {
        return direct;
    }

    let first = response.get("outputs")?.as_array()?.first()?;
    first
        .get("text")
        .or_else(|| first.get("content"))
        .and_then(value_to_text)
        .filter(|s| !s.is_empty())
}

/// A string is taken as-is; a structured object yields its `content` or
/// `text` field; anything else non-null is stringified.
fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => match map.get("content").or_else(|| map.get("text")) {
            Some(Value::String(s)) => Some(s.clone()),
            _ => Some(value.to_string()),
        },
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Character-safe truncation (payloads may contain multi-byte text).
fn truncate_chars(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        s.chars().take(max_chars).collect()
    }
}
