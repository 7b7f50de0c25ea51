//! # Model client abstraction
//!
//! [`LlmClient`] answers a question given a prompt and the conversation so far;
//! [`ImageClient`] turns a description into an image URL. Both are transport-agnostic and
//! object-safe, so the bot holds them as `Arc<dyn ...>` and tests substitute mocks.

use std::collections::BTreeMap;

use anyhow::Result;
use async_trait::async_trait;
use prompt::{build_messages, ChatMessage};
use serde_json::Value;

mod image;

pub use image::{ImageSize, ImageSizeError};

/// One question for the model.
#[derive(Debug, Clone, PartialEq)]
pub struct AskRequest {
    pub model: String,
    /// System prompt; empty for none.
    pub prompt: String,
    pub question: String,
    /// Previous `(question, answer)` pairs, oldest first.
    pub history: Vec<(String, String)>,
    /// Provider request parameters (temperature, max_tokens, ...).
    pub params: BTreeMap<String, Value>,
}

impl AskRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            question: question.into(),
            history: Vec::new(),
            params: BTreeMap::new(),
        }
    }

    pub fn with_history(mut self, history: Vec<(String, String)>) -> Self {
        self.history = history;
        self
    }

    pub fn with_params(mut self, params: BTreeMap<String, Value>) -> Self {
        self.params = params;
        self
    }

    /// Chat messages for this request: system prompt, history turns, question.
    pub fn messages(&self) -> Vec<ChatMessage> {
        build_messages(
            &self.prompt,
            self.history.iter().map(|(q, a)| (q.as_str(), a.as_str())),
            &self.question,
        )
    }
}

/// Model-invocation service.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Returns the answer text, or the provider error.
    async fn ask(&self, request: AskRequest) -> Result<String>;
}

/// Image-generation service.
#[async_trait]
pub trait ImageClient: Send + Sync {
    /// Returns the URL of an image generated from `prompt`.
    async fn imagine(&self, prompt: &str, size: ImageSize) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use prompt::MessageRole;
    use std::sync::Arc;

    struct Echo;

    #[async_trait]
    impl LlmClient for Echo {
        async fn ask(&self, request: AskRequest) -> Result<String> {
            Ok(request.question)
        }
    }

    #[test]
    fn test_request_messages() {
        let request = AskRequest::new("gpt-4", "Be brief.", "Q2")
            .with_history(vec![("Q1".into(), "A1".into())]);
        let messages = request.messages();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].role, MessageRole::System);
        assert_eq!(messages[3].content, "Q2");
    }

    #[tokio::test]
    async fn test_client_is_object_safe() {
        let client: Arc<dyn LlmClient> = Arc::new(Echo);
        let answer = client.ask(AskRequest::new("m", "", "ping")).await.unwrap();
        assert_eq!(answer, "ping");
    }
}
