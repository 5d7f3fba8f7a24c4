//! Result types returned by the `MindReader`.
//!
//! Field names match the prompt schemas so results serialize to the same JSON
//! shape the backend was asked for, plus the locally computed extras.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::analysis::flags::DeceptionFlag;
use crate::error::AppError;

/// The six fixed emotion keys, in schema order.
pub const EMOTION_KEYS: [&str; 6] = ["joy", "sadness", "anger", "fear", "surprise", "love"];

/// Intensity per emotion, each in `0..=100`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionalSpectrum {
    pub joy: u8,
    pub sadness: u8,
    pub anger: u8,
    pub fear: u8,
    pub surprise: u8,
    pub love: u8,
}

impl EmotionalSpectrum {
    pub fn get(&self, key: &str) -> Option<u8> {
        match key {
            "joy" => Some(self.joy),
            "sadness" => Some(self.sadness),
            "anger" => Some(self.anger),
            "fear" => Some(self.fear),
            "surprise" => Some(self.surprise),
            "love" => Some(self.love),
            _ => None,
        }
    }

    /// `(key, score)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u8)> + '_ {
        EMOTION_KEYS.iter().filter_map(move |k| self.get(k).map(|v| (*k, v)))
    }

    /// The strongest emotion; ties resolve to the earlier key.
    pub fn dominant(&self) -> (&'static str, u8) {
        self.iter()
            .fold(("joy", self.joy), |best, cur| if cur.1 > best.1 { cur } else { best })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LieDetection {
    /// Model score minus the rule-based penalty, clamped.
    pub truthfulness_score: u8,
    pub confidence_score: u8,
    pub flags: Vec<DeceptionFlag>,
    pub confidence_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalityProfile {
    #[serde(rename = "type")]
    pub kind: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextResult {
    pub emotional_spectrum: EmotionalSpectrum,
    pub lie_detection: LieDetection,
    pub personality_profile: PersonalityProfile,
    pub hidden_meaning: String,
    pub suggested_replies: Vec<String>,
    pub better_version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TruthfulnessIndicator {
    pub status: String,
    pub score: u8,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResult {
    pub primary_emotion: String,
    pub micro_expressions: String,
    pub truthfulness_indicator: TruthfulnessIndicator,
    pub mental_state_summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioResult {
    pub emotional_tone: String,
    pub speech_patterns: String,
    pub truthfulness_indicator: TruthfulnessIndicator,
    pub transcript: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodSuggestions {
    pub mood_analysis: String,
    pub music: String,
    pub activity: String,
    pub food: String,
    pub quote: String,
}

/// Fixed reply used when crisis language is detected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrisisSupport {
    pub mood_analysis: String,
    pub music: String,
    pub activity: String,
    pub food: String,
    pub quote: String,
    pub support: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SuggestionResult {
    Mood(MoodSuggestions),
    Crisis(CrisisSupport),
}

impl SuggestionResult {
    pub fn is_crisis(&self) -> bool {
        matches!(self, SuggestionResult::Crisis(_))
    }

    pub fn mood(&self) -> &str {
        match self {
            SuggestionResult::Mood(m) => &m.mood_analysis,
            SuggestionResult::Crisis(c) => &c.mood_analysis,
        }
    }

    pub fn quote(&self) -> &str {
        match self {
            SuggestionResult::Mood(m) => &m.quote,
            SuggestionResult::Crisis(c) => &c.quote,
        }
    }
}

/// Text analysis and suggestions produced by one combined scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoodScan {
    pub analysis: TextResult,
    pub suggestions: SuggestionResult,
}

/// Uniform failure variant of every analysis operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResult {
    pub error: String,
}

impl ErrorResult {
    pub fn new(message: impl Into<String>) -> Self {
        Self { error: message.into() }
    }
}

impl fmt::Display for ErrorResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.error)
    }
}

impl std::error::Error for ErrorResult {}

impl From<AppError> for ErrorResult {
    fn from(err: AppError) -> Self {
        ErrorResult::new(err.to_string())
    }
}
