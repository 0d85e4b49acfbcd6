use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};

use super::sse::{decode_fragments, ApiErrorBody};
use super::{ChatRequest, CompletionClient, FragmentStream};
use crate::credential::Credential;
use crate::error::ChainError;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const COMPLETIONS_PATH: &str = "/chat/completions";
pub const MODEL: &str = "gpt-4o";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Root of an OpenAI-compatible API, without the `/chat/completions` suffix.
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ApiErrorBody,
}

/// Streaming client for the OpenAI chat-completions endpoint.
///
/// No timeout is configured beyond what the connection itself enforces, and
/// failures are returned as-is without retrying.
pub struct OpenAiClient {
    client: reqwest::Client,
    /// Full endpoint URL (base + COMPLETIONS_PATH).
    url: String,
}

impl OpenAiClient {
    pub fn new(config: &ClientConfig) -> Self {
        let base = config.base_url.trim_end_matches('/');
        Self {
            client: reqwest::Client::new(),
            url: format!("{base}{COMPLETIONS_PATH}"),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn stream(
        &self,
        credential: &Credential,
        prompt: &str,
    ) -> Result<FragmentStream, ChainError> {
        let request = ChatRequest::streaming_user_prompt(MODEL, prompt);
        debug!(
            model = MODEL,
            prompt_bytes = prompt.len(),
            "opening chat completion stream"
        );

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(credential.expose())
            .json(&request)
            .send()
            .await
            .map_err(|e| ChainError::request(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(&body).unwrap_or_else(|| status.to_string());
            warn!(%status, "completion request rejected");
            return Err(if status == StatusCode::UNAUTHORIZED {
                ChainError::authentication(message)
            } else {
                ChainError::request(format!("API returned {status}: {message}"))
            });
        }

        Ok(decode_fragments(response.bytes_stream()))
    }
}

/// Pulls `error.message` out of an API error body.
fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error.message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_and_path() {
        let client = OpenAiClient::new(&ClientConfig::default());
        assert_eq!(client.url(), "https://api.openai.com/v1/chat/completions");

        let client = OpenAiClient::new(&ClientConfig {
            base_url: "http://localhost:8080/v1/".into(),
        });
        assert_eq!(client.url(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn extracts_api_error_message() {
        let body = r#"{"error":{"message":"Incorrect API key provided: sk-xx.","type":"invalid_request_error","code":"invalid_api_key"}}"#;
        assert_eq!(
            error_message(body).as_deref(),
            Some("Incorrect API key provided: sk-xx.")
        );
        assert_eq!(error_message("<html>bad gateway</html>"), None);
    }
}
