//! Integration Tests
//!
//! Full workflow over HTTP: `MindReader::connect` against a wiremock stand-in
//! for the Gemini REST API, from catalog discovery to normalized results.

use crate::analysis::{verify_key, MindReader, Style};
use crate::config::MindReaderConfig;
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> MindReaderConfig {
    MindReaderConfig::new("integration-key")
        .unwrap()
        .with_base_url(server.uri())
        .with_timeout_secs(5)
}

fn wrap_text(text: &str) -> serde_json::Value {
    json!({"candidates": [{"content": {"parts": [{"text": text}]}, "finishReason": "STOP"}]})
}

async fn mount_catalog(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v1beta/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "models": [
                {"name": "models/embedding-001", "supportedGenerationMethods": ["embedContent"]},
                {"name": "models/gemini-1.5-flash", "supportedGenerationMethods": ["generateContent", "countTokens"]}
            ]
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[cfg(test)]
mod workflow_tests {
    use super::*;

    #[tokio::test]
    async fn test_text_analysis_over_http() {
        // 1. Arrange
        let server = MockServer::start().await;
        mount_catalog(&server).await;

        let model_reply = "```json\n{\"emotional_spectrum\": {\"joy\": 5, \"sadness\": 40, \"anger\": 12, \"fear\": 77, \"surprise\": 3, \"love\": 0}, \"lie_detection\": {\"truthfulness_score\": 80, \"confidence_score\": 55}, \"personality_profile\": {\"type\": \"Introvert\", \"summary\": \"Defensive when questioned\"}, \"hidden_meaning\": \"Afraid of blame\", \"suggested_replies\": [\"a\", \"b\", \"c\"], \"better_version\": \"I did not take it.\"}\n```";
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
            .and(body_string_contains("forensic psychologist"))
            .respond_with(ResponseTemplate::new(200).set_body_json(wrap_text(model_reply)))
            .expect(1)
            .mount(&server)
            .await;

        let reader = MindReader::connect(&config_for(&server)).await.unwrap();

        // 2. Act
        let result = reader
            .analyze_text("Why would I take it? I already told you, I guess.", Style::Calm)
            .await;

        // 3. Assert
        let report = result.unwrap();
        assert_eq!(reader.model(), "models/gemini-1.5-flash");
        // guess, why would i, i already told
        assert_eq!(report.lie_detection.flags.len(), 3);
        assert_eq!(report.lie_detection.truthfulness_score, 65);
        assert_eq!(report.lie_detection.confidence_label, "Emotionally uncertain or guarded");
        assert_eq!(report.emotional_spectrum.fear, 77);
        assert_eq!(reader.context().len(), 1);
    }

    #[tokio::test]
    async fn test_http_error_becomes_error_result() {
        let server = MockServer::start().await;
        mount_catalog(&server).await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "error": {"code": 429, "message": "Resource has been exhausted", "status": "RESOURCE_EXHAUSTED"}
            })))
            .mount(&server)
            .await;

        let reader = MindReader::connect(&config_for(&server)).await.unwrap();
        let failure = reader.get_suggestions("I'm okay I suppose", Style::Calm).await.unwrap_err();

        assert!(failure.error.contains("429"));
        assert!(failure.error.contains("Resource has been exhausted"));
    }

    #[tokio::test]
    async fn test_catalog_outage_uses_default_model() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1beta/models"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let reader = MindReader::connect(&config_for(&server)).await.unwrap();
        assert_eq!(reader.model(), crate::backend::DEFAULT_MODEL);
    }

    #[tokio::test]
    async fn test_image_sent_as_inline_data() {
        let server = MockServer::start().await;
        mount_catalog(&server).await;

        let reply = json!({
            "primary_emotion": "Surprise",
            "micro_expressions": "Raised brows",
            "truthfulness_indicator": {"status": "Likely Truthful", "score": 74, "reason": "Symmetric expression"},
            "mental_state_summary": "Alert"
        });
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
            .and(body_string_contains("inline_data"))
            .and(body_string_contains("image/jpeg"))
            .respond_with(ResponseTemplate::new(200).set_body_json(wrap_text(&reply.to_string())))
            .expect(1)
            .mount(&server)
            .await;

        let reader = MindReader::connect(&config_for(&server)).await.unwrap();
        let result = reader.analyze_image(vec![0xFF, 0xD8, 0xFF, 0xDB, 0x00], Style::Calm).await.unwrap();

        assert_eq!(result.truthfulness_indicator.score, 74);
        assert_eq!(result.primary_emotion, "Surprise");
    }

    #[tokio::test]
    async fn test_crisis_never_reaches_server() {
        let server = MockServer::start().await;
        mount_catalog(&server).await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(wrap_text("{}")))
            .expect(0)
            .mount(&server)
            .await;

        let reader = MindReader::connect(&config_for(&server)).await.unwrap();
        let result = reader.get_suggestions("I think I will end it all", Style::Calm).await.unwrap();

        assert!(result.is_crisis());
    }

    #[tokio::test]
    async fn test_verify_key_round_trip() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
            .and(body_string_contains("Say hello"))
            .respond_with(ResponseTemplate::new(200).set_body_json(wrap_text("Hello! \n")))
            .expect(1)
            .mount(&server)
            .await;

        let reply = verify_key(&config_for(&server)).await.unwrap();
        assert_eq!(reply, "Hello!");
    }
}
