//! Model discovery.
//!
//! Picks the first catalog entry that can generate content and follows the
//! "flash" / "pro" naming convention. Any failure falls back to a fixed default.

use tracing::{info, warn};

use super::traits::InferenceBackend;
use super::types::ModelInfo;

pub const DEFAULT_MODEL: &str = "models/gemini-1.5-flash";

const GENERATE_METHOD: &str = "generateContent";
const NAME_MARKERS: &[&str] = &["flash", "pro"];

/// First catalog entry usable for free-form generation, if any.
pub fn pick_model(models: &[ModelInfo]) -> Option<&ModelInfo> {
    models.iter().find(|m| {
        let name = m.name.to_lowercase();
        m.supports(GENERATE_METHOD) && NAME_MARKERS.iter().any(|marker| name.contains(marker))
    })
}

/// Queries the backend catalog once and returns the model identifier to target.
pub async fn select_model(backend: &dyn InferenceBackend) -> String {
    match backend.list_models().await {
        Ok(models) => match pick_model(&models) {
            Some(model) => {
                info!(model = %model.name, candidates = models.len(), "Selected model from catalog");
                model.name.clone()
            }
            None => {
                warn!(candidates = models.len(), "No catalog model matched; using {}", DEFAULT_MODEL);
                DEFAULT_MODEL.to_string()
            }
        },
        Err(e) => {
            warn!(error = %e, "Model catalog query failed; using {}", DEFAULT_MODEL);
            DEFAULT_MODEL.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_skips_non_generating_models() {
        let models = vec![
            ModelInfo::new("models/embedding-001", &["embedContent"]),
            ModelInfo::new("models/gemini-pro-vision-embed", &["embedContent"]),
            ModelInfo::new("models/gemini-1.5-pro", &["generateContent", "countTokens"]),
            ModelInfo::new("models/gemini-1.5-flash", &["generateContent"]),
        ];
        assert_eq!(pick_model(&models).unwrap().name, "models/gemini-1.5-pro");
    }

    #[test]
    fn test_pick_requires_naming_convention() {
        let models = vec![ModelInfo::new("models/text-bison-001", &["generateContent"])];
        assert!(pick_model(&models).is_none());
    }

    #[test]
    fn test_pick_is_case_insensitive() {
        let models = vec![ModelInfo::new("models/Gemini-2.0-FLASH", &["generateContent"])];
        assert!(pick_model(&models).is_some());
    }
}
