//! Conversation memory.
//!
//! A fixed-capacity FIFO of recent text analyses. The snapshot is embedded in
//! later prompts so the backend sees how the subject's mood has been moving.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::VecDeque;

/// Maximum number of remembered interactions.
pub const MEMORY_CAPACITY: usize = 5;

/// Characters of input kept per interaction.
pub const SNIPPET_CHARS: usize = 80;

/// Truncates on character boundaries, never mid code point.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub timestamp: DateTime<Local>,
    pub text_snippet: String,
    pub mood_label: String,
}

/// Read-only, oldest-first snapshot of the memory.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConversationContext {
    entries: Vec<Interaction>,
}

impl ConversationContext {
    pub fn entries(&self) -> &[Interaction] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// JSON array of `{time, text, mood}` objects, as embedded in prompts.
    pub fn to_prompt_block(&self) -> String {
        let items: Vec<serde_json::Value> = self
            .entries
            .iter()
            .map(|i| {
                json!({
                    "time": i.timestamp.format("%H:%M:%S").to_string(),
                    "text": i.text_snippet,
                    "mood": i.mood_label,
                })
            })
            .collect();
        serde_json::Value::Array(items).to_string()
    }
}

#[derive(Debug)]
pub struct ConversationMemory {
    entries: VecDeque<Interaction>,
    capacity: usize,
}

impl Default for ConversationMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationMemory {
    pub fn new() -> Self {
        Self::with_capacity(MEMORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends an interaction, evicting the oldest once full.
    pub fn remember(&mut self, text: &str, mood: &str) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(Interaction {
            timestamp: Local::now(),
            text_snippet: truncate_chars(text, SNIPPET_CHARS),
            mood_label: mood.to_string(),
        });
    }

    pub fn context(&self) -> ConversationContext {
        ConversationContext {
            entries: self.entries.iter().cloned().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evicts_oldest_after_capacity() {
        let mut memory = ConversationMemory::new();
        for i in 1..=6 {
            memory.remember(&format!("message {}", i), "Calm");
        }

        let context = memory.context();
        assert_eq!(context.len(), 5);
        let snippets: Vec<&str> = context.entries().iter().map(|e| e.text_snippet.as_str()).collect();
        assert!(!snippets.contains(&"message 1"));
        assert_eq!(snippets.first(), Some(&"message 2"));
        assert_eq!(snippets.last(), Some(&"message 6"));
    }

    #[test]
    fn test_snippet_truncated_to_80_chars() {
        let mut memory = ConversationMemory::new();
        let long = "é".repeat(200);
        memory.remember(&long, "Anxious");
        let context = memory.context();
        let snippet = &context.entries()[0].text_snippet;
        assert_eq!(snippet.chars().count(), SNIPPET_CHARS);
    }

    #[test]
    fn test_context_is_a_snapshot() {
        let mut memory = ConversationMemory::new();
        memory.remember("first", "Calm");
        let snapshot = memory.context();
        memory.remember("second", "Calm");
        assert_eq!(snapshot.len(), 1);
        assert_eq!(memory.len(), 2);
    }

    #[test]
    fn test_prompt_block() {
        let mut memory = ConversationMemory::new();
        assert_eq!(memory.context().to_prompt_block(), "[]");

        memory.remember("I \"swear\" it", "Introvert");
        let block: serde_json::Value = serde_json::from_str(&memory.context().to_prompt_block()).unwrap();
        assert_eq!(block[0]["text"], "I \"swear\" it");
        assert_eq!(block[0]["mood"], "Introvert");
        assert_eq!(block[0]["time"].as_str().unwrap().len(), 8);
    }

    #[test]
    fn test_clear() {
        let mut memory = ConversationMemory::new();
        memory.remember("x", "y");
        memory.clear();
        assert!(memory.is_empty());
    }
}
