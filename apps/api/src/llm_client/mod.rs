/// LLM Client — the single point of entry for all Claude API calls in Thought Loop.
///
/// ARCHITECTURAL RULE: No other module may call the Anthropic API directly.
/// Callers depend on the `TextCompletion` trait, never on `LlmClient` itself.
///
/// Model: claude-sonnet-4-5 (hardcoded — do not make configurable to prevent drift)
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[cfg(test)]
pub mod fake;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all LLM calls in Thought Loop.
pub const MODEL: &str = "claude-sonnet-4-5";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Text-in, text-out completion service.
#[async_trait]
pub trait TextCompletion: Send + Sync {
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, LlmError>;
}

/// Result of a completion whose failure is shown to the user as text
/// instead of an error status.
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionOutcome {
    Text(String),
    Failed(String),
}

impl CompletionOutcome {
    pub fn from_result(result: Result<String, LlmError>) -> Self {
        match result {
            Ok(text) => CompletionOutcome::Text(text),
            Err(e) => {
                tracing::warn!("LLM completion failed, folding error into reply: {e}");
                CompletionOutcome::Failed(e.to_string())
            }
        }
    }

    /// The text placed in the response body.
    pub fn into_display_text(self) -> String {
        match self {
            CompletionOutcome::Text(text) => text,
            CompletionOutcome::Failed(error) => format!("エラーが発生しました: {error}"),
        }
    }
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Extracts the text content from the first text block.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// Wraps the Anthropic Messages API. One attempt per call: no retry, no backoff.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()?,
            api_key,
        })
    }

    /// Makes a raw call to the Claude API, returning the full response object.
    pub async fn call(&self, prompt: &str, max_tokens: u32) -> Result<LlmResponse, LlmError> {
        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: parse_error_message(body),
            });
        }

        let llm_response: LlmResponse = response.json().await?;

        debug!(
            "LLM call succeeded: input_tokens={}, output_tokens={}",
            llm_response.usage.input_tokens, llm_response.usage.output_tokens
        );

        Ok(llm_response)
    }
}

#[async_trait]
impl TextCompletion for LlmClient {
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, LlmError> {
        let response = self.call(prompt, max_tokens).await?;
        response
            .text()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(LlmError::EmptyContent)
    }
}

/// Pulls `error.message` out of an Anthropic error body, falling back to the raw body.
fn parse_error_message(body: String) -> String {
    serde_json::from_str::<AnthropicError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_message_from_api_body() {
        let body = r#"{"type":"error","error":{"type":"authentication_error","message":"invalid x-api-key"}}"#;
        assert_eq!(parse_error_message(body.to_string()), "invalid x-api-key");
    }

    #[test]
    fn test_parse_error_message_keeps_raw_body() {
        assert_eq!(parse_error_message("Bad Gateway".to_string()), "Bad Gateway");
    }

    #[test]
    fn test_response_text_picks_first_text_block() {
        let response: LlmResponse = serde_json::from_str(
            r#"{"content":[{"type":"tool_use"},{"type":"text","text":"Why now?"}],
                "usage":{"input_tokens":12,"output_tokens":3}}"#,
        )
        .unwrap();
        assert_eq!(response.text(), Some("Why now?"));
    }

    #[test]
    fn test_failed_outcome_becomes_conversational_text() {
        let outcome = CompletionOutcome::from_result(Err(LlmError::Api {
            status: 429,
            message: "quota exceeded".to_string(),
        }));
        assert_eq!(
            outcome.into_display_text(),
            "エラーが発生しました: API error (status 429): quota exceeded"
        );
    }

    #[test]
    fn test_successful_outcome_passes_text_through() {
        let outcome = CompletionOutcome::from_result(Ok("What felt different?".to_string()));
        assert_eq!(outcome, CompletionOutcome::Text("What felt different?".to_string()));
        assert_eq!(outcome.into_display_text(), "What felt different?");
    }
}
