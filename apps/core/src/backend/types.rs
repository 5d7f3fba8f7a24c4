//! Request envelope and catalog types shared by every backend implementation.

use infer::MatcherType;
use serde::{Deserialize, Serialize};

pub const DEFAULT_IMAGE_MIME: &str = "image/jpeg";
pub const DEFAULT_AUDIO_MIME: &str = "audio/wav";

/// Raw bytes sent alongside the prompt text, tagged with their MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl Attachment {
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Image attachment; keeps a sniffed image MIME type, otherwise `image/jpeg`.
    pub fn image(data: Vec<u8>) -> Self {
        let mime = sniff(&data, MatcherType::Image).unwrap_or(DEFAULT_IMAGE_MIME);
        Self::new(mime, data)
    }

    /// Audio attachment; keeps a sniffed audio MIME type, otherwise `audio/wav`.
    pub fn audio(data: Vec<u8>) -> Self {
        let mime = sniff(&data, MatcherType::Audio).unwrap_or(DEFAULT_AUDIO_MIME);
        Self::new(mime, data)
    }
}

fn sniff(data: &[u8], expected: MatcherType) -> Option<&'static str> {
    infer::get(data)
        .filter(|kind| kind.matcher_type() == expected)
        .map(|kind| kind.mime_type())
}

/// One generation request: instruction text plus at most one binary part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    pub text: String,
    pub attachment: Option<Attachment>,
}

impl PromptRequest {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attachment: None,
        }
    }

    pub fn with_attachment(text: impl Into<String>, attachment: Attachment) -> Self {
        Self {
            text: text.into(),
            attachment: Some(attachment),
        }
    }
}

/// Catalog entry as reported by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    pub name: String,
    #[serde(default)]
    pub supported_generation_methods: Vec<String>,
}

impl ModelInfo {
    pub fn new(name: &str, methods: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            supported_generation_methods: methods.iter().map(|m| m.to_string()).collect(),
        }
    }

    pub fn supports(&self, method: &str) -> bool {
        self.supported_generation_methods.iter().any(|m| m == method)
    }
}
