//! Scan history.
//!
//! One record per successful combined scan. Bounded like the conversation
//! memory: once full, the oldest record is evicted.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::analysis::memory::truncate_chars;

/// Maximum number of scans kept per reader.
pub const HISTORY_CAPACITY: usize = 100;

/// Characters of input kept per record.
pub const HISTORY_SNIPPET_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRecord {
    pub timestamp: DateTime<Local>,
    pub snippet: String,
    pub truthfulness_score: u8,
    pub mood: String,
}

#[derive(Debug)]
pub struct ScanHistory {
    records: VecDeque<ScanRecord>,
    capacity: usize,
}

impl Default for ScanHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanHistory {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn record(&mut self, text: &str, truthfulness_score: u8, mood: &str) {
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(ScanRecord {
            timestamp: Local::now(),
            snippet: truncate_chars(text, HISTORY_SNIPPET_CHARS),
            truthfulness_score,
            mood: mood.to_string(),
        });
    }

    /// Oldest-first snapshot.
    pub fn records(&self) -> Vec<ScanRecord> {
        self.records.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Mean truthfulness across the kept scans, if any.
    pub fn average_truthfulness(&self) -> Option<f64> {
        if self.records.is_empty() {
            return None;
        }
        let total: u32 = self.records.iter().map(|r| u32::from(r.truthfulness_score)).sum();
        Some(f64::from(total) / self.records.len() as f64)
    }
}
