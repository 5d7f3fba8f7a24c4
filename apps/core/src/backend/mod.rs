//! # Backend Module
//!
//! Boundary to the remote multimodal inference service.
//!
//! ## Components
//! - `traits`: the `InferenceBackend` seam the orchestrator talks to
//! - `types`: request envelope, typed attachments, catalog entries
//! - `gemini`: production HTTP client for the Gemini REST API
//! - `selector`: one-shot model discovery from the catalog

pub mod gemini;
pub mod selector;
pub mod traits;
pub mod types;

pub use gemini::GeminiClient;
pub use selector::{select_model, DEFAULT_MODEL};
pub use traits::InferenceBackend;
pub use types::{Attachment, ModelInfo, PromptRequest};
