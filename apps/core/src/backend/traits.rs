use crate::backend::types::{ModelInfo, PromptRequest};
use crate::error::AppError;
use async_trait::async_trait;

/// Defines the public interface for the inference service.
///
/// This trait abstracts the concrete service so the orchestrator can be driven by the
/// production HTTP client or by an in-process stub interchangeably.
#[async_trait]
pub trait InferenceBackend: Send + Sync + 'static {
    /// Generates free-form text for a prompt (and optional attachment) with the given model.
    async fn generate(&self, model: &str, request: PromptRequest) -> Result<String, AppError>;

    /// Lists the models the service exposes, with the generation methods each supports.
    async fn list_models(&self) -> Result<Vec<ModelInfo>, AppError>;
}
