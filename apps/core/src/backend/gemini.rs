use crate::backend::traits::InferenceBackend;
use crate::backend::types::{Attachment, ModelInfo, PromptRequest};
use crate::config::MindReaderConfig;
use crate::error::AppError;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};
use url::Url;

const API_KEY_HEADER: &str = "x-goog-api-key";
const MODELS_PATH: &str = "v1beta/models";
const CATALOG_PAGE_SIZE: &str = "1000";
const MAX_CATALOG_PAGES: usize = 10;

// --- Wire types ---

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
enum Part {
    Text(String),
    InlineData { mime_type: String, data: String },
}

impl From<&Attachment> for Part {
    fn from(attachment: &Attachment) -> Self {
        Part::InlineData {
            mime_type: attachment.mime_type.clone(),
            data: BASE64.encode(&attachment.data),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetails,
}

#[derive(Debug, Deserialize)]
struct ErrorDetails {
    message: String,
    status: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate, or the reason there is none.
    fn into_text(self) -> Result<String, AppError> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(AppError::Backend(format!("Prompt blocked by the service: {}", reason)));
        }

        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Backend("Response contained no candidates".to_string()))?;

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.is_empty() {
            let reason = candidate.finish_reason.unwrap_or_else(|| "UNKNOWN".to_string());
            return Err(AppError::Backend(format!("Response contained no text (finish reason: {})", reason)));
        }
        Ok(text)
    }
}

/// HTTP client for the Gemini `generateContent` REST API.
pub struct GeminiClient {
    client: Client,
    base_url: Url,
    api_key: String,
    request_timeout: Duration,
}

impl GeminiClient {
    /// Creates a client from a validated configuration.
    pub fn new(config: &MindReaderConfig) -> Result<Self, AppError> {
        config.check()?;

        let mut base_url = config.base_url()?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client: Client::new(),
            base_url,
            api_key: config.api_key.clone(),
            request_timeout: config.request_timeout(),
        })
    }

    fn generate_url(&self, model: &str) -> Result<Url, AppError> {
        let model = if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{}", model)
        };
        Ok(self.base_url.join(&format!("v1beta/{}:generateContent", model))?)
    }

    async fn error_from_response(response: reqwest::Response) -> AppError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let detail = match serde_json::from_str::<ErrorEnvelope>(&body) {
            Ok(envelope) => match envelope.error.status {
                Some(code) => format!("{} ({})", envelope.error.message, code),
                None => envelope.error.message,
            },
            Err(_) => body,
        };
        AppError::Backend(format!("Request failed with status {}: {}", status, detail))
    }

    async fn post_generate(&self, url: Url, payload: &GenerateRequest) -> Result<String, AppError> {
        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AppError::Backend(format!("Malformed generateContent response: {}", e)))?;
        body.into_text()
    }

    async fn fetch_catalog_page(&self, page_token: Option<&str>) -> Result<ListModelsResponse, AppError> {
        let mut url = self.base_url.join(MODELS_PATH)?;
        url.query_pairs_mut().append_pair("pageSize", CATALOG_PAGE_SIZE);
        if let Some(token) = page_token {
            url.query_pairs_mut().append_pair("pageToken", token);
        }

        timeout(self.request_timeout, self.get_catalog(url)).await?
    }

    async fn get_catalog(&self, url: Url) -> Result<ListModelsResponse, AppError> {
        let response = self.client.get(url).header(API_KEY_HEADER, &self.api_key).send().await?;
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        response
            .json::<ListModelsResponse>()
            .await
            .map_err(|e| AppError::Backend(format!("Malformed model catalog: {}", e)))
    }
}

#[async_trait]
impl InferenceBackend for GeminiClient {
    async fn generate(&self, model: &str, request: PromptRequest) -> Result<String, AppError> {
        let url = self.generate_url(model)?;

        let mut parts = vec![Part::Text(request.text)];
        if let Some(attachment) = &request.attachment {
            debug!(mime = %attachment.mime_type, bytes = attachment.data.len(), "Attaching binary part");
            parts.push(Part::from(attachment));
        }
        let payload = GenerateRequest {
            contents: vec![Content { role: "user", parts }],
        };

        info!(model, "Sending generateContent request");
        timeout(self.request_timeout, self.post_generate(url, &payload)).await?
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>, AppError> {
        let mut models = Vec::new();
        let mut page_token: Option<String> = None;

        for _ in 0..MAX_CATALOG_PAGES {
            let page = self.fetch_catalog_page(page_token.as_deref()).await?;
            models.extend(page.models);
            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => return Ok(models),
            }
        }

        warn!("Model catalog still paginating after {} pages; using what was fetched", MAX_CATALOG_PAGES);
        Ok(models)
    }
}
