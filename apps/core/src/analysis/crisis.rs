//! Crisis detection.
//!
//! A hard safety override: when self-harm language is present, suggestions come
//! from a fixed support message and the backend is never consulted.

use crate::analysis::results::CrisisSupport;

pub const CRISIS_PHRASES: &[&str] = &[
    "kill myself",
    "end it all",
    "no reason to live",
    "suicide",
    "i want to die",
    "i don't want to live",
];

pub const SUPPORT_LINE: &str = "If you're in India: AASRA 24/7 Helpline: +91-9820466726";

pub struct CrisisDetector {
    phrases: &'static [&'static str],
}

impl Default for CrisisDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl CrisisDetector {
    pub fn new() -> Self {
        Self {
            phrases: CRISIS_PHRASES,
        }
    }

    /// Case-insensitive match; typographic apostrophes count as `'`.
    pub fn is_crisis(&self, text: &str) -> bool {
        let lowered = text.to_lowercase().replace('\u{2019}', "'");
        self.phrases.iter().any(|p| lowered.contains(p))
    }

    /// The fixed reply returned in place of model suggestions.
    pub fn support(&self) -> CrisisSupport {
        CrisisSupport {
            mood_analysis: "Crisis".to_string(),
            music: "—".to_string(),
            activity: "Please reach out to someone you trust right now.".to_string(),
            food: "—".to_string(),
            quote: "You matter more than you know.".to_string(),
            support: SUPPORT_LINE.to_string(),
        }
    }
}
