//! OpenAI-compatible chat completions backend.
//!
//! OpenAI and DeepSeek share the `/chat/completions` wire format; the
//! provider selection only changes credentials and base URL.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use scribe_core::completion::CompletionBackend;
use scribe_core::config::LlmConfig;
use scribe_core::error::{Result, ScribeError};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Backend that talks to an OpenAI-style chat completions endpoint.
#[derive(Clone)]
pub struct ChatCompletionsBackend {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
}

impl ChatCompletionsBackend {
    /// Creates a new backend with the provided API key and model, aimed
    /// at the OpenAI endpoint.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: OPENAI_BASE_URL.to_string(),
            model: model.into(),
            temperature: 0.0,
            max_tokens: None,
        }
    }

    /// Creates a backend from the resolved application LLM configuration.
    pub fn from_config(config: &LlmConfig) -> Self {
        let mut backend = Self::new(config.api_key.clone(), config.model.clone())
            .with_temperature(config.temperature)
            .with_max_tokens(config.max_tokens);
        if let Some(base) = &config.api_base {
            backend = backend.with_base_url(base.clone());
        }
        backend
    }

    /// Overrides the API base URL (OpenAI-compatible providers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets the maximum number of tokens to generate.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    async fn send_request(&self, body: &ChatCompletionRequest<'_>) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| ScribeError::generation(format!("completion request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read completion error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|err| {
            ScribeError::generation(format!("failed to parse completion response: {err}"))
        })?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl CompletionBackend for ChatCompletionsBackend {
    async fn complete(&self, system_message: &str, user_message: &str) -> Result<String> {
        if user_message.trim().is_empty() {
            return Err(ScribeError::generation("user message cannot be empty"));
        }

        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_message,
                },
                ChatMessage {
                    role: "user",
                    content: user_message,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        tracing::debug!(model = %self.model, "sending completion request");
        self.send_request(&request).await
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn extract_text_response(response: ChatCompletionResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| ScribeError::generation("completion returned no content"))
}

fn map_http_error(status: StatusCode, body: String) -> ScribeError {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or(body);

    ScribeError::generation(format!("provider returned {status}: {message}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe_core::completion::LlmProvider;

    #[test]
    fn extracts_first_choice_content() {
        let response: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"content": "generated text"}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text_response(response).unwrap(), "generated text");
    }

    #[test]
    fn missing_content_is_a_generation_error() {
        let response: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"content": null}}]}"#).unwrap();
        assert!(extract_text_response(response).unwrap_err().is_generation());
    }

    #[test]
    fn whitespace_only_content_is_a_generation_error() {
        let response: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"content": "  \n"}}]}"#).unwrap();
        assert!(extract_text_response(response).unwrap_err().is_generation());
    }

    #[test]
    fn http_error_extracts_provider_message() {
        let err = map_http_error(
            StatusCode::TOO_MANY_REQUESTS,
            r#"{"error": {"message": "rate limited", "type": "requests"}}"#.to_string(),
        );
        assert!(err.is_generation());
        assert!(err.to_string().contains("rate limited"));
        assert!(err.to_string().contains("429"));
    }

    #[test]
    fn from_config_selects_endpoint_per_provider() {
        let openai = LlmConfig {
            provider: LlmProvider::OpenAi,
            model: "gpt-4o".to_string(),
            temperature: 0.2,
            max_tokens: 512,
            api_key: "sk-test".to_string(),
            api_base: None,
        };
        let backend = ChatCompletionsBackend::from_config(&openai);
        assert_eq!(backend.base_url, OPENAI_BASE_URL);
        assert_eq!(backend.max_tokens, Some(512));

        let deepseek = LlmConfig {
            provider: LlmProvider::DeepSeek,
            model: "deepseek-chat".to_string(),
            temperature: 0.0,
            max_tokens: 1024,
            api_key: "dsk-test".to_string(),
            api_base: Some("https://api.deepseek.com".to_string()),
        };
        let backend = ChatCompletionsBackend::from_config(&deepseek);
        assert_eq!(backend.base_url, "https://api.deepseek.com");
    }
}
