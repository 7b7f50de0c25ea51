//! # Prompt
//!
//! Builds the message list sent to a chat model: the system prompt, then the conversation so far
//! as alternating user/assistant turns, then the current question.
//!
//! ```text
//! system:    {prompt}
//! user:      {question 1}
//! assistant: {answer 1}
//! ...
//! user:      {current question}
//! ```

use serde::{Deserialize, Serialize};

/// Role of a message, one-to-one with the Chat Completions `role` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Messages for one model request.
///
/// `history` is oldest-first `(question, answer)` pairs. An empty `prompt` adds no system message.
pub fn build_messages<H, Q, A>(prompt: &str, history: H, question: &str) -> Vec<ChatMessage>
where
    H: IntoIterator<Item = (Q, A)>,
    Q: AsRef<str>,
    A: AsRef<str>,
{
    let mut messages = Vec::new();
    if !prompt.is_empty() {
        messages.push(ChatMessage::system(prompt));
    }
    for (q, a) in history {
        messages.push(ChatMessage::user(q.as_ref()));
        messages.push(ChatMessage::assistant(a.as_ref()));
    }
    messages.push(ChatMessage::user(question));
    messages
}

/// Single-string rendering of the same conversation, for completion-style models and logs.
pub fn format_transcript(messages: &[ChatMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        let label = match message.role {
            MessageRole::System => "System",
            MessageRole::User => "User",
            MessageRole::Assistant => "Assistant",
        };
        out.push_str(label);
        out.push_str(": ");
        out.push_str(&message.content);
        out.push('\n');
    }
    out
}
