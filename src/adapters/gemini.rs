//! Google Gemini `generateContent` client.

use crate::config::generation::GenerationSettings;
use crate::domain::ports::TutorialGenerator;
use crate::utils::error::{BotError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
    response_mime_type: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: Option<u32>,
    #[serde(default)]
    candidates_token_count: Option<u32>,
    #[serde(default)]
    total_token_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_base: String,
    api_key: String,
    settings: GenerationSettings,
}

impl GeminiClient {
    pub fn new(
        api_base: impl Into<String>,
        api_key: impl Into<String>,
        settings: GenerationSettings,
        timeout: Duration,
    ) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(BotError::MissingConfigError {
                field: "GEMINI_API_KEY".to_string(),
            });
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            api_key,
            settings,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base, self.settings.model
        )
    }

    fn request_body<'a>(&'a self, prompt: &'a str) -> GenerateContentRequest<'a> {
        GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.settings.temperature,
                top_p: self.settings.top_p,
                top_k: self.settings.top_k,
                max_output_tokens: self.settings.max_output_tokens,
                response_mime_type: &self.settings.response_mime_type,
            },
        }
    }

    fn extract_text(response: GenerateContentResponse) -> Result<String> {
        let Some(candidate) = response.candidates.into_iter().next() else {
            let reason = response
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .unwrap_or_else(|| "unknown".to_string());
            return Err(BotError::GenerationError {
                message: format!("No candidates in response (block reason: {})", reason),
            });
        };

        let text: String = candidate
            .content
            .map(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|p| p.text)
            .collect();

        if text.is_empty() {
            return Err(BotError::GenerationError {
                message: format!(
                    "Empty response (finish reason: {})",
                    candidate.finish_reason.as_deref().unwrap_or("unknown")
                ),
            });
        }

        Ok(text)
    }
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("api_base", &self.api_base)
            .field("model", &self.settings.model)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl TutorialGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        debug!(
            "Sending {} character prompt to Gemini model {}",
            prompt.chars().count(),
            self.settings.model
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&self.request_body(prompt))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or(body);
            error!("Gemini API error: {} - {}", status, message);
            return Err(BotError::GenerationError {
                message: format!("HTTP {}: {}", status, message),
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &parsed.usage_metadata {
            info!(
                "Gemini usage - Prompt: {:?} tokens, Response: {:?} tokens, Total: {:?} tokens",
                usage.prompt_token_count, usage.candidates_token_count, usage.total_token_count
            );
        }

        Self::extract_text(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client(server: &MockServer) -> GeminiClient {
        GeminiClient::new(
            server.base_url(),
            "test-key",
            GenerationSettings::default(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_key_is_rejected() {
        let result = GeminiClient::new(
            DEFAULT_API_BASE,
            "",
            GenerationSettings::default(),
            Duration::from_secs(5),
        );
        assert!(matches!(result, Err(BotError::MissingConfigError { .. })));
    }

    #[test]
    fn test_request_body_is_camel_case() {
        let client = GeminiClient::new(
            DEFAULT_API_BASE,
            "k",
            GenerationSettings::default(),
            Duration::from_secs(5),
        )
        .unwrap();
        let body = serde_json::to_value(client.request_body("hello")).unwrap();

        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(body["generationConfig"]["topK"], 40);
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 8192);
        assert_eq!(body["generationConfig"]["responseMimeType"], "text/plain");
    }

    #[tokio::test]
    async fn test_generate_joins_parts() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1beta/models/gemini-1.5-flash-8b:generateContent")
                    .header("x-goog-api-key", "test-key")
                    .body_contains("Transcript: hi");
                then.status(200).json_body(serde_json::json!({
                    "candidates": [{
                        "content": {"role": "model", "parts": [{"text": "Part one. "}, {"text": "Part two."}]},
                        "finishReason": "STOP"
                    }],
                    "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 5, "totalTokenCount": 15}
                }));
            })
            .await;

        let text = client(&server).generate("Transcript: hi").await.unwrap();

        mock.assert_async().await;
        assert_eq!(text, "Part one. Part two.");
    }

    #[tokio::test]
    async fn test_api_error_message_is_surfaced() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(400).json_body(serde_json::json!({
                    "error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}
                }));
            })
            .await;

        let err = client(&server).generate("x").await.unwrap_err();
        assert!(err.to_string().contains("API key not valid."));
    }

    #[tokio::test]
    async fn test_blocked_prompt() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200).json_body(serde_json::json!({
                    "promptFeedback": {"blockReason": "SAFETY"}
                }));
            })
            .await;

        let err = client(&server).generate("x").await.unwrap_err();
        assert!(err.to_string().contains("block reason: SAFETY"));
    }

    #[tokio::test]
    async fn test_empty_candidate() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200).json_body(serde_json::json!({
                    "candidates": [{"finishReason": "MAX_TOKENS"}]
                }));
            })
            .await;

        let err = client(&server).generate("x").await.unwrap_err();
        assert!(err.to_string().contains("finish reason: MAX_TOKENS"));
    }
}
