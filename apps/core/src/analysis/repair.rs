//! Response repair.
//!
//! The backend is a free-text generator: it often wraps its JSON in code fences
//! or adds a sentence before/after it. Parsing is two-tier: the cleaned text as a
//! whole, then the widest `{ ... }` span.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::debug;

use crate::error::AppError;

/// First `{` through last `}`, across newlines.
static OBJECT_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("Invalid regex: object span pattern"));

/// Removes code-fence markers from both ends of a reply.
pub fn strip_fences(raw: &str) -> &str {
    let mut text = raw.trim();
    for opener in ["```json", "```JSON", "```"] {
        if let Some(rest) = text.strip_prefix(opener) {
            text = rest;
            break;
        }
    }
    text.strip_suffix("```").unwrap_or(text).trim()
}

fn parse_object(text: &str) -> Option<Value> {
    serde_json::from_str::<Value>(text).ok().filter(Value::is_object)
}

/// Recovers the JSON object carried by a model reply.
pub fn parse_model_output(raw: &str) -> Result<Value, AppError> {
    let cleaned = strip_fences(raw);
    if let Some(value) = parse_object(cleaned) {
        return Ok(value);
    }

    debug!(len = raw.len(), "Direct parse failed, searching for an object span");
    OBJECT_SPAN
        .find(cleaned)
        .and_then(|m| parse_object(m.as_str()))
        .ok_or_else(|| AppError::Parse("no structured object found".to_string()))
}
