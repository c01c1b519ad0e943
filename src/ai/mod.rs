//! Action-item extraction through a chat-completion service
//!
//! - `client`: HTTP client for the completion proxy
//! - `summarizer`: prompt construction and reply parsing

mod client;
mod prompts;
mod summarizer;

pub use client::{CompletionBackend, CompletionClient};
pub use summarizer::Summarizer;

#[cfg(test)]
pub use summarizer::fake;
