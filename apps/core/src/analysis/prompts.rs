//! Prompt templates.
//!
//! The schema blocks below are the contract with the backend: normalization
//! looks fields up by these exact names.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::analysis::memory::ConversationContext;
use crate::backend::types::{Attachment, PromptRequest};

/// Tone preset applied to prompt phrasing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    #[default]
    Calm,
    Friendly,
    Professional,
    Motivational,
}

impl Style {
    /// Unknown names fall back to `Calm`.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "friendly" => Style::Friendly,
            "professional" => Style::Professional,
            "motivational" => Style::Motivational,
            _ => Style::Calm,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Style::Calm => "calm",
            Style::Friendly => "friendly",
            Style::Professional => "professional",
            Style::Motivational => "motivational",
        }
    }

    pub fn instruction(&self) -> &'static str {
        match self {
            Style::Calm => "Speak gently, slowly, and reassuringly.",
            Style::Friendly => "Be warm, casual, and supportive.",
            Style::Professional => "Use structured, therapist-style clinical language.",
            Style::Motivational => "Be energetic, inspiring, and confidence-boosting.",
        }
    }
}

impl FromStr for Style {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Style::parse(s))
    }
}

impl From<&str> for Style {
    fn from(s: &str) -> Self {
        Style::parse(s)
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub const TEXT_SCHEMA: &str = r#"{
    "emotional_spectrum": {
        "joy": 0,
        "sadness": 0,
        "anger": 0,
        "fear": 0,
        "surprise": 0,
        "love": 0
    },
    "lie_detection": {
        "truthfulness_score": 0,
        "confidence_score": 0
    },
    "personality_profile": {
        "type": "Introvert/Extrovert/Ambivert",
        "summary": "One sentence insight"
    },
    "hidden_meaning": "What do they ACTUALLY mean? (Be direct, not rude)",
    "suggested_replies": ["Diplomatic", "Direct", "Professional"],
    "better_version": "Improved professional rewrite"
}"#;

pub const IMAGE_SCHEMA: &str = r#"{
    "primary_emotion": "Dominant emotion",
    "micro_expressions": "Describe eyes, lips, posture cues",
    "truthfulness_indicator": {
        "status": "Likely Truthful / Deceptive / Anxious",
        "score": 0,
        "reason": "Why?"
    },
    "mental_state_summary": "Psychological summary"
}"#;

pub const AUDIO_SCHEMA: &str = r#"{
    "emotional_tone": "e.g., Nervous, Aggressive, Calm, Deceptive",
    "speech_patterns": "Describe pauses, stuttering, speed",
    "truthfulness_indicator": {
        "status": "Likely Truthful / High Stress Detected / Deceptive",
        "score": 0,
        "reason": "Why?"
    },
    "transcript": "Accurate transcription"
}"#;

pub const SUGGESTION_SCHEMA: &str = r#"{
    "mood_analysis": "One-word mood",
    "music": "Song Name - Artist (matches mood)",
    "activity": "A 2-minute action they can do now",
    "food": "Comfort food recommendation",
    "quote": "Short powerful motivation"
}"#;

/// What to analyze. Binary payloads travel as attachments, never inside the text.
#[derive(Debug, Clone)]
pub enum PromptTask<'a> {
    Text(&'a str),
    Image(Vec<u8>),
    Audio(Vec<u8>),
    Suggestions(&'a str),
}

impl PromptTask<'_> {
    pub fn label(&self) -> &'static str {
        match self {
            PromptTask::Text(_) => "text",
            PromptTask::Image(_) => "image",
            PromptTask::Audio(_) => "audio",
            PromptTask::Suggestions(_) => "suggestions",
        }
    }
}

/// Composes the request for a task under a tone preset and conversation context.
pub fn build_prompt(task: PromptTask<'_>, style: Style, context: &ConversationContext) -> PromptRequest {
    let history = context.to_prompt_block();
    let tone = style.instruction();

    match task {
        PromptTask::Text(text) => PromptRequest::text(format!(
            r#"
You are a forensic psychologist & deception analyst.

Conversation context:
{history}

Style:
{tone}

Rules:
- Penalize avoidance & defensiveness
- All scores must be integers 0–100
- Return valid JSON only. No markdown. No extra text.

Analyze this text:
"{text}"

Return JSON:
{TEXT_SCHEMA}
"#
        )),
        PromptTask::Image(bytes) => PromptRequest::with_attachment(
            format!(
                r#"
You are an expert behavioral psychologist and facial expression analyst.

Conversation context:
{history}

Style:
{tone}

Rules:
- Return valid JSON only
- No markdown, no explanations

Analyze the micro-expressions in this image.

Return JSON:
{IMAGE_SCHEMA}
"#
            ),
            Attachment::image(bytes),
        ),
        PromptTask::Audio(bytes) => PromptRequest::with_attachment(
            format!(
                r#"
You are a voice stress analyst and behavioral psychologist.

Conversation context:
{history}

Style:
{tone}

Rules:
- Return valid JSON only
- No markdown, no extra text

Analyze tone, pitch, speed, and pauses.

Return JSON:
{AUDIO_SCHEMA}
"#
            ),
            Attachment::audio(bytes),
        ),
        PromptTask::Suggestions(text) => PromptRequest::text(format!(
            r#"
You are a psychological therapist & AI companion.

Conversation context:
{history}

Style:
{tone}

Rules:
- Return valid JSON only
- No markdown, no explanations

User said:
"{text}"

Return JSON:
{SUGGESTION_SCHEMA}
"#
        )),
    }
}
