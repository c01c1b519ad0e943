use super::client::{ChatRequest, CompletionBackend, Message};
use super::prompts;
use crate::config::SummarizerConfig;
use crate::constants::{SUMMARY_ERROR_MARKER, SUMMARY_TEMPERATURE};

/// Turns email text into an ordered list of action strings.
///
/// Every call issues a fresh request; nothing is cached and nothing is retried.
pub struct Summarizer<C> {
    backend: C,
    model: String,
    max_tokens: u32,
}

impl<C: CompletionBackend> Summarizer<C> {
    pub fn new(backend: C, config: &SummarizerConfig) -> Self {
        Self {
            backend,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        }
    }

    #[cfg(test)]
    pub fn backend(&self) -> &C {
        &self.backend
    }

    pub fn request_for(&self, content: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            temperature: SUMMARY_TEMPERATURE,
            max_tokens: self.max_tokens,
            messages: vec![Message {
                role: "system".to_string(),
                content: prompts::action_items_prompt(content),
            }],
        }
    }

    /// Summarize into actions. Failures collapse into a single marker action.
    pub async fn summarize(&self, content: &str) -> Vec<String> {
        let request = self.request_for(content);
        match self.backend.complete(&request).await {
            Ok(text) => {
                let actions = parse_actions(&text);
                tracing::debug!("Summarizer produced {} action(s)", actions.len());
                actions
            }
            Err(e) => {
                tracing::error!("Error summarizing content: {:#}", e);
                vec![SUMMARY_ERROR_MARKER.to_string()]
            }
        }
    }
}

/// One action per non-blank line, in order
pub fn parse_actions(text: &str) -> Vec<String> {
    text.trim()
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.trim_end().to_string())
        .collect()
}
