//! MindReader - main orchestrator of the analysis engine.
//!
//! Every operation follows the same pipeline:
//! 1. Build the prompt (task template + tone + conversation context)
//! 2. One backend call, no retry
//! 3. Repair the reply into a JSON object
//! 4. Normalize scores (and, for text, fold in the rule-based flags)
//!
//! Failures never escape as panics or `AppError`s: they come back as `ErrorResult`.

use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{error, info, instrument, warn};

use super::crisis::CrisisDetector;
use super::flags::DeceptionFlagger;
use super::history::{ScanHistory, ScanRecord};
use super::memory::{ConversationContext, ConversationMemory};
use super::prompts::{build_prompt, PromptTask, Style};
use super::repair::parse_model_output;
use super::results::{AudioResult, ErrorResult, ImageResult, MoodScan, SuggestionResult, TextResult};
use super::wire::{decode, RawAudioAnalysis, RawImageAnalysis, RawSuggestions, RawTextAnalysis};
use crate::backend::gemini::GeminiClient;
use crate::backend::selector::{select_model, DEFAULT_MODEL};
use crate::backend::traits::InferenceBackend;
use crate::backend::types::PromptRequest;
use crate::config::MindReaderConfig;
use crate::error::AppError;

const VERIFY_PROMPT: &str = "Say hello";

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Converts an engine error into the caller-facing failure variant, logging it once.
fn fail(task: &'static str, err: AppError) -> ErrorResult {
    error!(task, kind = err.kind(), error = %err, "Analysis failed");
    ErrorResult::from(err)
}

/// The analysis engine.
///
/// Owns its conversation memory and scan history; both sit behind mutexes that are
/// never held across a backend call, so one reader can be shared between tasks.
pub struct MindReader {
    backend: Arc<dyn InferenceBackend>,
    model: String,
    flagger: DeceptionFlagger,
    crisis: CrisisDetector,
    memory: Mutex<ConversationMemory>,
    history: Mutex<ScanHistory>,
}

impl MindReader {
    /// Creates a reader on top of the production Gemini client.
    pub async fn connect(config: &MindReaderConfig) -> Result<Self, AppError> {
        let backend = GeminiClient::new(config)?;
        Self::new(config, Arc::new(backend)).await
    }

    /// Creates a reader on top of any backend.
    ///
    /// Fails fast with `AppError::Config` when the credential is empty. The target model is
    /// resolved here, once: the configured override if any, otherwise catalog discovery.
    ///
    /// # Arguments
    ///
    /// * `config` - Validated engine configuration.
    /// * `backend` - The inference service to call.
    pub async fn new(config: &MindReaderConfig, backend: Arc<dyn InferenceBackend>) -> Result<Self, AppError> {
        config.check()?;

        let model = match &config.model {
            Some(model) => {
                info!(model = %model, "Using configured model");
                model.clone()
            }
            None => select_model(backend.as_ref()).await,
        };

        Ok(Self {
            backend,
            model,
            flagger: DeceptionFlagger::new(),
            crisis: CrisisDetector::new(),
            memory: Mutex::new(ConversationMemory::new()),
            history: Mutex::new(ScanHistory::new()),
        })
    }

    /// The model identifier chosen at construction.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Snapshot of the conversation memory, oldest first.
    pub fn context(&self) -> ConversationContext {
        lock(&self.memory).context()
    }

    /// Snapshot of completed combined scans, oldest first.
    pub fn history(&self) -> Vec<ScanRecord> {
        lock(&self.history).records()
    }

    /// Mean truthfulness over the kept scans, `None` before the first scan.
    pub fn average_truthfulness(&self) -> Option<f64> {
        lock(&self.history).average_truthfulness()
    }

    /// Records an interaction in the conversation memory.
    pub fn remember(&self, text: &str, mood: &str) {
        lock(&self.memory).remember(text, mood);
    }

    /// Forgets the conversation memory.
    pub fn reset_memory(&self) {
        lock(&self.memory).clear();
    }

    async fn call_backend(&self, request: PromptRequest) -> Result<Value, AppError> {
        let raw = self.backend.generate(&self.model, request).await?;
        parse_model_output(&raw)
    }

    /// Emotional spectrum, deception reading and rewrite suggestions for a piece of text.
    ///
    /// On success the text is remembered with the reported personality type as its mood.
    #[instrument(skip(self, text), fields(len = text.len()))]
    pub async fn analyze_text(&self, text: &str, style: Style) -> Result<TextResult, ErrorResult> {
        let flags = self.flagger.flag(text);
        let task = PromptTask::Text(text);
        let label = task.label();
        let request = build_prompt(task, style, &self.context());

        let reply = self.call_backend(request).await.map_err(|e| fail(label, e))?;
        let raw: RawTextAnalysis = decode(reply).map_err(|e| fail(label, e))?;
        let result = raw.normalize(flags);

        let (dominant, intensity) = result.emotional_spectrum.dominant();
        info!(
            dominant,
            intensity,
            truthfulness = result.lie_detection.truthfulness_score,
            confidence = result.lie_detection.confidence_score,
            flags = result.lie_detection.flags.len(),
            "Text analysis complete"
        );
        self.remember(text, &result.personality_profile.kind);
        Ok(result)
    }

    /// Micro-expression reading of a face image.
    #[instrument(skip(self, image), fields(bytes = image.len()))]
    pub async fn analyze_image(&self, image: Vec<u8>, style: Style) -> Result<ImageResult, ErrorResult> {
        let task = PromptTask::Image(image);
        let label = task.label();
        let request = build_prompt(task, style, &self.context());

        let reply = self.call_backend(request).await.map_err(|e| fail(label, e))?;
        let raw: RawImageAnalysis = decode(reply).map_err(|e| fail(label, e))?;
        Ok(raw.normalize())
    }

    /// Voice stress reading and transcript of an audio clip.
    #[instrument(skip(self, audio), fields(bytes = audio.len()))]
    pub async fn analyze_audio(&self, audio: Vec<u8>, style: Style) -> Result<AudioResult, ErrorResult> {
        let task = PromptTask::Audio(audio);
        let label = task.label();
        let request = build_prompt(task, style, &self.context());

        let reply = self.call_backend(request).await.map_err(|e| fail(label, e))?;
        let raw: RawAudioAnalysis = decode(reply).map_err(|e| fail(label, e))?;
        Ok(raw.normalize())
    }

    /// Mood-based music, activity, food and quote suggestions.
    ///
    /// Crisis language short-circuits to a fixed support message without a backend call.
    /// Reads the conversation memory but never writes it.
    #[instrument(skip(self, text), fields(len = text.len()))]
    pub async fn get_suggestions(&self, text: &str, style: Style) -> Result<SuggestionResult, ErrorResult> {
        if self.crisis.is_crisis(text) {
            warn!("Crisis language detected; returning support message");
            return Ok(SuggestionResult::Crisis(self.crisis.support()));
        }

        let task = PromptTask::Suggestions(text);
        let label = task.label();
        let request = build_prompt(task, style, &self.context());

        let reply = self.call_backend(request).await.map_err(|e| fail(label, e))?;
        let raw: RawSuggestions = decode(reply).map_err(|e| fail(label, e))?;
        Ok(SuggestionResult::Mood(raw.normalize()))
    }

    /// Text analysis followed by suggestions, issued sequentially.
    ///
    /// Both must succeed for the scan to be added to the history; the first failure is returned.
    #[instrument(skip(self, text), fields(len = text.len()))]
    pub async fn scan_text(&self, text: &str, style: Style) -> Result<MoodScan, ErrorResult> {
        let analysis = self.analyze_text(text, style).await?;
        let suggestions = self.get_suggestions(text, style).await?;

        let (scans, average) = {
            let mut history = lock(&self.history);
            history.record(text, analysis.lie_detection.truthfulness_score, suggestions.mood());
            (history.len(), history.average_truthfulness())
        };
        info!(scans, average_truthfulness = ?average, mood = suggestions.mood(), "Scan recorded");
        Ok(MoodScan { analysis, suggestions })
    }
}

/// Issues a single plain generate call to check that the credential works.
///
/// Uses the configured model or the default one; no catalog query is made.
pub async fn verify_key(config: &MindReaderConfig) -> Result<String, AppError> {
    let client = GeminiClient::new(config)?;
    verify_with(config, &client).await
}

pub(crate) async fn verify_with(config: &MindReaderConfig, backend: &dyn InferenceBackend) -> Result<String, AppError> {
    let model = config.model.as_deref().unwrap_or(DEFAULT_MODEL);
    info!(model, key = %config.masked_key(), "Verifying API key");
    let reply = backend.generate(model, PromptRequest::text(VERIFY_PROMPT)).await?;
    Ok(reply.trim().to_string())
}
