//! Chat-completion client for the summarization proxy

use std::future::Future;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::SummarizerConfig;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Anything that can answer a chat-completion request with the first choice's text
pub trait CompletionBackend: Send + Sync {
    fn complete(&self, request: &ChatRequest) -> impl Future<Output = Result<String>> + Send;
}

/// HTTP client for an OpenAI-compatible completions endpoint.
///
/// The endpoint is expected to be a server-side proxy holding the provider key;
/// the optional bearer key only authenticates against that proxy.
#[derive(Clone)]
pub struct CompletionClient {
    client: Client,
    endpoint: String,
    bearer: Option<String>,
}

impl CompletionClient {
    pub fn new(config: &SummarizerConfig, bearer: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .context("Failed to build completion HTTP client")?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            bearer,
        })
    }
}

impl CompletionBackend for CompletionClient {
    async fn complete(&self, request: &ChatRequest) -> Result<String> {
        let mut builder = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json");
        if let Some(ref key) = self.bearer {
            builder = builder.header("Authorization", format!("Bearer {}", key));
        }

        let response = builder
            .json(request)
            .send()
            .await
            .context("Failed to send request to completion service")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Completion service error ({}): {}", status, error_text);
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .context("Failed to parse completion response")?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| anyhow::anyhow!("No response content from completion service"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::serve_once;

    fn request() -> ChatRequest {
        ChatRequest {
            model: "gpt-3.5-turbo".to_string(),
            temperature: 0.0,
            max_tokens: 1000,
            messages: vec![Message {
                role: "system".to_string(),
                content: "Summarize".to_string(),
            }],
        }
    }

    fn client_for(base_url: String, bearer: Option<String>) -> CompletionClient {
        let config = SummarizerConfig {
            endpoint: format!("{}/v1/chat/completions", base_url),
            ..SummarizerConfig::default()
        };
        CompletionClient::new(&config, bearer).unwrap()
    }

    #[test]
    fn test_request_wire_shape() {
        let json = serde_json::to_value(request()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "gpt-3.5-turbo",
                "temperature": 0.0,
                "max_tokens": 1000,
                "messages": [{"role": "system", "content": "Summarize"}]
            })
        );
    }

    #[tokio::test]
    async fn test_complete_returns_first_choice() {
        let (url, captured) = serve_once(
            "200 OK",
            r#"{"choices":[{"message":{"content":"- one\n- two"}},{"message":{"content":"ignored"}}]}"#,
        )
        .await;

        let client = client_for(url, Some("proxy-key".to_string()));
        let content = client.complete(&request()).await.unwrap();
        assert_eq!(content, "- one\n- two");

        let raw = captured.await.unwrap();
        assert!(raw.starts_with("POST /v1/chat/completions "));
        assert!(raw.to_ascii_lowercase().contains("authorization: bearer proxy-key"));
        assert!(raw.contains(r#""max_tokens":1000"#));
    }

    #[tokio::test]
    async fn test_complete_error_status() {
        let (url, _captured) = serve_once("429 Too Many Requests", r#"{"error":"slow down"}"#).await;

        let err = client_for(url, None).complete(&request()).await.unwrap_err();
        assert!(err.to_string().contains("429"));
    }

    #[tokio::test]
    async fn test_complete_empty_choices() {
        let (url, _captured) = serve_once("200 OK", r#"{"choices":[]}"#).await;
        assert!(client_for(url, None).complete(&request()).await.is_err());
    }

    #[tokio::test]
    async fn test_complete_unparseable_body() {
        let (url, _captured) = serve_once("200 OK", "not json").await;
        assert!(client_for(url, None).complete(&request()).await.is_err());
    }
}
