use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use url::Url;
use validator::Validate;

use crate::error::AppError;

/// Environment variable holding the inference service credential.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
/// Optional override for the backend model, skipping catalog discovery.
pub const MODEL_VAR: &str = "GEMINI_MODEL";
/// Optional override for the service root URL.
pub const BASE_URL_VAR: &str = "GEMINI_BASE_URL";
/// Optional per-request timeout in seconds.
pub const TIMEOUT_VAR: &str = "MINDREADER_TIMEOUT_SECS";

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Configuration handed to the `MindReader` and its backend client.
#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
pub struct MindReaderConfig {
    /// Credential for the inference service. Must be non-empty.
    #[validate(length(min = 1))]
    pub api_key: String,
    /// Root URL of the inference service.
    #[validate(url)]
    pub base_url: String,
    /// Explicit model identifier (e.g. `models/gemini-1.5-flash`). `None` means discover.
    pub model: Option<String>,
    /// Upper bound for a single backend call, in seconds.
    #[validate(range(min = 1, max = 600))]
    pub request_timeout_secs: u64,
}

impl MindReaderConfig {
    /// Builds a config with defaults around the given credential and validates it.
    pub fn new(api_key: impl Into<String>) -> Result<Self, AppError> {
        let config = Self {
            api_key: api_key.into().trim().to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: None,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        };
        config.check()?;
        Ok(config)
    }

    /// Loads `.env` (if present) and then reads the process environment.
    pub fn load() -> Result<Self, AppError> {
        dotenv::dotenv().ok();
        Self::from_env()
    }

    /// Reads configuration from the process environment only.
    pub fn from_env() -> Result<Self, AppError> {
        let api_key = env::var(API_KEY_VAR)
            .map(|k| k.trim().to_string())
            .unwrap_or_default();
        if api_key.is_empty() {
            return Err(AppError::Config(format!("{} not found in environment or .env", API_KEY_VAR)));
        }

        let base_url = env::var(BASE_URL_VAR)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let model = env::var(MODEL_VAR).ok().map(|m| m.trim().to_string()).filter(|m| !m.is_empty());
        let request_timeout_secs = match env::var(TIMEOUT_VAR) {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|e| AppError::Config(format!("{} must be a whole number of seconds: {}", TIMEOUT_VAR, e)))?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let config = Self {
            api_key,
            base_url,
            model,
            request_timeout_secs,
        };
        config.check()?;
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    /// Validates field constraints. An empty key is reported as a configuration error.
    pub fn check(&self) -> Result<(), AppError> {
        if self.api_key.trim().is_empty() {
            return Err(AppError::Config("API key is required".to_string()));
        }
        self.validate()?;
        Ok(())
    }

    pub fn base_url(&self) -> Result<Url, AppError> {
        Ok(Url::parse(&self.base_url)?)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Key rendered for display, e.g. `AIza...x9Qk`.
    pub fn masked_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        if chars.len() <= 8 {
            return "*".repeat(chars.len());
        }
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}
