//! Incoming message type for the core model.

use serde::{Deserialize, Serialize};

use super::{chat::Chat, user::User};

/// A single message with user, chat, content, and optional reply context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub content: String,
    pub reply_to_message_id: Option<String>,
    /// Whether the replied-to message was sent by the bot; only meaningful when `reply_to_message_id` is set.
    pub reply_to_message_from_bot: bool,
    /// Content of the replied-to message; group questions that quote another message use it.
    pub reply_to_message_content: Option<String>,
}

impl Message {
    /// Incoming text message with no reply context.
    pub fn text(id: impl Into<String>, user: User, chat: Chat, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            user,
            chat,
            content: content.into(),
            reply_to_message_id: None,
            reply_to_message_from_bot: false,
            reply_to_message_content: None,
        }
    }

    pub fn is_reply(&self) -> bool {
        self.reply_to_message_id.is_some()
    }

    /// Command name when the content starts with `/name` (a `@bot` suffix is dropped).
    pub fn command(&self) -> Option<&str> {
        let first = self.content.split_whitespace().next()?;
        let name = first.strip_prefix('/')?;
        let name = name.split('@').next().unwrap_or(name);
        (!name.is_empty()).then_some(name)
    }

    /// Text after the command word, trimmed. Empty when there are no arguments.
    pub fn command_args(&self) -> &str {
        self.content
            .trim_start()
            .split_once(char::is_whitespace)
            .map(|(_, rest)| rest.trim())
            .unwrap_or("")
    }
}
