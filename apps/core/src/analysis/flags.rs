//! Rule-based deception flags.
//!
//! Hedging and defensive phrasing is treated as corroborating evidence next to
//! the model's own truthfulness score: every hit costs a fixed penalty.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Hedging phrases.
pub const AVOIDANCE_PHRASES: &[&str] = &["maybe", "honestly", "to be frank", "sort of", "i think", "guess"];

/// Defensive phrases.
pub const DEFENSIVE_PHRASES: &[&str] = &["why would i", "i already told", "trust me", "believe me"];

/// Truthfulness points removed per flag.
pub const FLAG_PENALTY: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagCategory {
    Avoidance,
    Defensive,
}

/// A phrase from one of the fixed sets found in the analyzed text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeceptionFlag {
    pub category: FlagCategory,
    pub matched_phrase: String,
}

impl fmt::Display for DeceptionFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.category {
            FlagCategory::Avoidance => write!(f, "Avoidance word: {}", self.matched_phrase),
            FlagCategory::Defensive => write!(f, "Defensive phrase: {}", self.matched_phrase),
        }
    }
}

/// Case-insensitive substring scanner over the avoidance and defensive sets.
pub struct DeceptionFlagger {
    avoidance: &'static [&'static str],
    defensive: &'static [&'static str],
}

impl Default for DeceptionFlagger {
    fn default() -> Self {
        Self::new()
    }
}

impl DeceptionFlagger {
    pub fn new() -> Self {
        Self {
            avoidance: AVOIDANCE_PHRASES,
            defensive: DEFENSIVE_PHRASES,
        }
    }

    /// Flags in phrase-set order (all avoidance hits, then defensive), one per phrase.
    pub fn flag(&self, text: &str) -> Vec<DeceptionFlag> {
        let lowered = text.to_lowercase();
        let hits = |phrases: &'static [&'static str], category: FlagCategory| {
            phrases
                .iter()
                .filter(|p| lowered.contains(*p))
                .map(move |p| DeceptionFlag {
                    category,
                    matched_phrase: p.to_string(),
                })
                .collect::<Vec<_>>()
        };

        let mut flags = hits(self.avoidance, FlagCategory::Avoidance);
        flags.extend(hits(self.defensive, FlagCategory::Defensive));
        flags
    }

    /// Total truthfulness penalty for a set of flags.
    pub fn penalty(flags: &[DeceptionFlag]) -> i64 {
        FLAG_PENALTY.saturating_mul(flags.len() as i64)
    }
}
