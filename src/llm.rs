use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::config::GeminiConfig;

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// Stored without its URL so the request target never reaches callers.
    #[error("request failed: {0}")]
    Request(reqwest::Error),

    #[error("provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{0}")]
    Api(String),

    #[error("empty response from model")]
    EmptyResponse,
}

/// Anything that turns a prompt into generated text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        Self::Request(e.without_url())
    }
}

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        debug!(model = %self.config.model, prompt_len = prompt.len(), "calling gemini");

        let body = json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }]
        });

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(LlmError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        parse_reply(&text)
    }
}

fn parse_reply(raw: &str) -> Result<String, LlmError> {
    let parsed: GenerateContentResponse = serde_json::from_str(raw)?;
    if let Some(err) = parsed.error {
        return Err(LlmError::Api(err.message));
    }

    let text: String = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(LlmError::EmptyResponse);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> GeminiClient {
        GeminiClient::new(GeminiConfig {
            api_key: "test-key".into(),
            model: "gemini-2.0-flash".into(),
            base_url: server.uri(),
        })
    }

    #[test]
    fn parse_reply_joins_parts_of_first_candidate() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"text":"준성아, "},{"text":"좋아해."}]}},
                     {"content":{"parts":[{"text":"ignored"}]}}]}"#;
        assert_eq!(parse_reply(raw).unwrap(), "준성아, 좋아해.");
    }

    #[test]
    fn parse_reply_rejects_blank_text() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"text":"  \n"}]}}]}"#;
        assert!(matches!(parse_reply(raw), Err(LlmError::EmptyResponse)));

        let raw = r#"{"candidates":[]}"#;
        assert!(matches!(parse_reply(raw), Err(LlmError::EmptyResponse)));
    }

    #[test]
    fn parse_reply_surfaces_api_error() {
        let raw = r#"{"error":{"code":400,"message":"API key not valid"}}"#;
        match parse_reply(raw) {
            Err(LlmError::Api(msg)) => assert_eq!(msg, "API key not valid"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn generate_posts_prompt_with_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-2.0-flash:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "parts": [{ "text": "준성아, 나랑 만나볼래?" }] } }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = client_for(&server).generate("prompt").await.unwrap();
        assert_eq!(text, "준성아, 나랑 만나볼래?");
    }

    #[tokio::test]
    async fn transport_failure_does_not_expose_api_key() {
        let client = GeminiClient::new(GeminiConfig {
            api_key: "SECRET-KEY-123".into(),
            model: "m".into(),
            base_url: "http://127.0.0.1:1".into(),
        });

        let err = client.generate("prompt").await.unwrap_err();
        assert!(matches!(err, LlmError::Request(_)));

        let detail = AppError::from(err).to_string();
        assert!(detail.starts_with("Gemini API 호출 중 오류가 발생했습니다"));
        assert!(!detail.contains("SECRET-KEY-123"), "leaked: {detail}");
        assert!(!detail.contains("127.0.0.1:1"), "leaked url: {detail}");
    }

    #[tokio::test]
    async fn generate_reports_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        match client_for(&server).generate("prompt").await {
            Err(LlmError::Status { status, body }) => {
                assert_eq!(status, 503);
                assert_eq!(body, "overloaded");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
