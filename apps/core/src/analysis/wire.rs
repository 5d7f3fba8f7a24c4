//! Reply shapes as the backend actually emits them.
//!
//! Sections are required; leaves are lenient. Scores stay raw `Value`s until
//! normalization so penalties can be applied before clamping.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::analysis::flags::{DeceptionFlag, DeceptionFlagger};
use crate::analysis::results::{
    AudioResult, EmotionalSpectrum, ImageResult, LieDetection, MoodSuggestions, PersonalityProfile, TextResult,
    TruthfulnessIndicator,
};
use crate::analysis::score::{clamp, clamp_int, coerce, explain_score};
use crate::error::AppError;

fn value_to_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_text(Value::deserialize(deserializer)?))
}

fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().map(value_to_text).collect(),
        Value::Null => Vec::new(),
        single => vec![value_to_text(single)],
    })
}

/// Deserializes a repaired reply into one of the wire shapes.
pub(crate) fn decode<T: for<'de> Deserialize<'de>>(value: Value) -> Result<T, AppError> {
    serde_json::from_value(value).map_err(|e| AppError::Parse(format!("response did not match schema: {}", e)))
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawTextAnalysis {
    emotional_spectrum: Map<String, Value>,
    lie_detection: RawLieDetection,
    personality_profile: RawPersonality,
    #[serde(default, deserialize_with = "lenient_string")]
    hidden_meaning: String,
    #[serde(default, deserialize_with = "lenient_strings")]
    suggested_replies: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    better_version: String,
}

#[derive(Debug, Deserialize)]
struct RawLieDetection {
    #[serde(default)]
    truthfulness_score: Value,
    #[serde(default)]
    confidence_score: Value,
}

#[derive(Debug, Deserialize)]
struct RawPersonality {
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    kind: String,
    #[serde(default, deserialize_with = "lenient_string")]
    summary: String,
}

#[derive(Debug, Deserialize)]
struct RawIndicator {
    #[serde(default, deserialize_with = "lenient_string")]
    status: String,
    #[serde(default)]
    score: Value,
    #[serde(default, deserialize_with = "lenient_string")]
    reason: String,
}

impl RawIndicator {
    fn normalize(self) -> TruthfulnessIndicator {
        TruthfulnessIndicator {
            status: self.status,
            score: clamp(&self.score),
            reason: self.reason,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawImageAnalysis {
    #[serde(default, deserialize_with = "lenient_string")]
    primary_emotion: String,
    #[serde(default, deserialize_with = "lenient_string")]
    micro_expressions: String,
    truthfulness_indicator: RawIndicator,
    #[serde(default, deserialize_with = "lenient_string")]
    mental_state_summary: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawAudioAnalysis {
    #[serde(default, deserialize_with = "lenient_string")]
    emotional_tone: String,
    #[serde(default, deserialize_with = "lenient_string")]
    speech_patterns: String,
    truthfulness_indicator: RawIndicator,
    #[serde(default, deserialize_with = "lenient_string")]
    transcript: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawSuggestions {
    #[serde(default, deserialize_with = "lenient_string")]
    mood_analysis: String,
    #[serde(default, deserialize_with = "lenient_string")]
    music: String,
    #[serde(default, deserialize_with = "lenient_string")]
    activity: String,
    #[serde(default, deserialize_with = "lenient_string")]
    food: String,
    #[serde(default, deserialize_with = "lenient_string")]
    quote: String,
}

impl RawTextAnalysis {
    /// Clamps every score and folds the rule-based flags into truthfulness.
    ///
    /// The penalty only touches truthfulness; the label is read from confidence.
    pub(crate) fn normalize(self, flags: Vec<DeceptionFlag>) -> TextResult {
        let score_of = |key: &str| clamp(self.emotional_spectrum.get(key).unwrap_or(&Value::Null));
        let emotional_spectrum = EmotionalSpectrum {
            joy: score_of("joy"),
            sadness: score_of("sadness"),
            anger: score_of("anger"),
            fear: score_of("fear"),
            surprise: score_of("surprise"),
            love: score_of("love"),
        };

        let raw_truth = coerce(&self.lie_detection.truthfulness_score).unwrap_or(0);
        let truthfulness_score = clamp_int(raw_truth.saturating_sub(DeceptionFlagger::penalty(&flags)));
        let confidence_score = clamp(&self.lie_detection.confidence_score);

        TextResult {
            emotional_spectrum,
            lie_detection: LieDetection {
                truthfulness_score,
                confidence_score,
                flags,
                confidence_label: explain_score(confidence_score).to_string(),
            },
            personality_profile: PersonalityProfile {
                kind: self.personality_profile.kind,
                summary: self.personality_profile.summary,
            },
            hidden_meaning: self.hidden_meaning,
            suggested_replies: self.suggested_replies,
            better_version: self.better_version,
        }
    }
}

impl RawImageAnalysis {
    pub(crate) fn normalize(self) -> ImageResult {
        ImageResult {
            primary_emotion: self.primary_emotion,
            micro_expressions: self.micro_expressions,
            truthfulness_indicator: self.truthfulness_indicator.normalize(),
            mental_state_summary: self.mental_state_summary,
        }
    }
}

impl RawAudioAnalysis {
    pub(crate) fn normalize(self) -> AudioResult {
        AudioResult {
            emotional_tone: self.emotional_tone,
            speech_patterns: self.speech_patterns,
            truthfulness_indicator: self.truthfulness_indicator.normalize(),
            transcript: self.transcript,
        }
    }
}

impl RawSuggestions {
    pub(crate) fn normalize(self) -> MoodSuggestions {
        MoodSuggestions {
            mood_analysis: self.mood_analysis,
            music: self.music,
            activity: self.activity,
            food: self.food,
            quote: self.quote,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::flags::FlagCategory;
    use serde_json::json;

    fn flag(phrase: &str) -> DeceptionFlag {
        DeceptionFlag {
            category: FlagCategory::Avoidance,
            matched_phrase: phrase.to_string(),
        }
    }

    #[test]
    fn test_text_normalization_fills_and_clamps() {
        let raw: RawTextAnalysis = decode(json!({
            "emotional_spectrum": {"joy": 140, "sadness": "35", "anger": null, "envy": 90},
            "lie_detection": {"truthfulness_score": 90, "confidence_score": 65.7},
            "personality_profile": {"type": "Introvert", "summary": "Reserved"},
            "hidden_meaning": "Wants reassurance",
            "suggested_replies": ["a", "b", 3],
            "better_version": "Rewrite"
        }))
        .unwrap();

        let result = raw.normalize(vec![flag("maybe"), flag("honestly")]);

        assert_eq!(result.emotional_spectrum.joy, 100);
        assert_eq!(result.emotional_spectrum.sadness, 35);
        assert_eq!(result.emotional_spectrum.anger, 0);
        assert_eq!(result.emotional_spectrum.love, 0);
        assert_eq!(result.lie_detection.truthfulness_score, 80);
        assert_eq!(result.lie_detection.confidence_score, 65);
        assert_eq!(result.lie_detection.confidence_label, "Moderate confidence with mild emotional tension");
        assert_eq!(result.suggested_replies, vec!["a", "b", "3"]);
        assert_eq!(result.personality_profile.kind, "Introvert");
    }

    #[test]
    fn test_penalty_applies_before_clamping() {
        let raw: RawTextAnalysis = decode(json!({
            "emotional_spectrum": {},
            "lie_detection": {"truthfulness_score": 120, "confidence_score": 120},
            "personality_profile": {}
        }))
        .unwrap();

        let result = raw.normalize(vec![flag("maybe"), flag("guess")]);
        // 120 - 10 = 110, clamped to 100; confidence is never penalized.
        assert_eq!(result.lie_detection.truthfulness_score, 100);
        assert_eq!(result.lie_detection.confidence_score, 100);
    }

    #[test]
    fn test_penalty_never_goes_negative() {
        let raw: RawTextAnalysis = decode(json!({
            "emotional_spectrum": {},
            "lie_detection": {"truthfulness_score": 3},
            "personality_profile": {"type": "Ambivert"}
        }))
        .unwrap();
        assert_eq!(raw.normalize(vec![flag("maybe")]).lie_detection.truthfulness_score, 0);
    }

    #[test]
    fn test_missing_section_is_parse_error() {
        let result = decode::<RawTextAnalysis>(json!({"emotional_spectrum": {}}));
        match result {
            Err(AppError::Parse(msg)) => assert!(msg.contains("lie_detection")),
            other => panic!("Expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_image_indicator_clamped() {
        let raw: RawImageAnalysis = decode(json!({
            "primary_emotion": "Fear",
            "truthfulness_indicator": {"status": "Anxious", "score": "-20", "reason": "Tight lips"}
        }))
        .unwrap();
        let result = raw.normalize();
        assert_eq!(result.truthfulness_indicator.score, 0);
        assert_eq!(result.micro_expressions, "");
    }

    #[test]
    fn test_suggestions_lenient_strings() {
        let raw: RawSuggestions = decode(json!({"mood_analysis": "Tired", "music": null, "quote": 42})).unwrap();
        let result = raw.normalize();
        assert_eq!(result.mood_analysis, "Tired");
        assert_eq!(result.music, "");
        assert_eq!(result.quote, "42");
    }
}
