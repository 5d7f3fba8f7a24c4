//! # Analysis Module
//!
//! The MindReader engine: turns text, image or voice input into a structured
//! psychological report using the inference backend, then post-processes the
//! reply with local heuristics.
//!
//! ## Components
//! - `score`: integer clamping of backend scores and confidence labels
//! - `repair`: recovery of a JSON object from a chatty model reply
//! - `flags`: avoidance / defensive phrase heuristics
//! - `crisis`: self-harm language short-circuit
//! - `memory`: bounded conversation history used as prompt context
//! - `prompts`: prompt templates and tone presets
//! - `results`: public result types
//! - `wire`: lenient reply shapes and their normalization into results
//! - `history`: per-reader record of combined mood scans
//! - `orchestrator`: `MindReader`, the public entry point

pub mod crisis;
pub mod flags;
pub mod history;
pub mod memory;
pub mod orchestrator;
pub mod prompts;
pub mod repair;
pub mod results;
pub mod score;
mod wire;

pub use crisis::CrisisDetector;
pub use flags::{DeceptionFlag, DeceptionFlagger, FlagCategory};
pub use history::{ScanHistory, ScanRecord};
pub use memory::{ConversationContext, ConversationMemory, Interaction};
pub use orchestrator::{verify_key, MindReader};
pub use prompts::{PromptTask, Style};
pub use repair::parse_model_output;
pub use results::{
    AudioResult, CrisisSupport, EmotionalSpectrum, ErrorResult, ImageResult, LieDetection, MoodScan,
    MoodSuggestions, PersonalityProfile, SuggestionResult, TextResult, TruthfulnessIndicator,
};
pub use score::{clamp, explain_score};
