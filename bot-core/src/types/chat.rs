//! Chat identity type for core messages.

use serde::{Deserialize, Serialize};

/// Chat type string used by private (one-to-one) chats.
pub const PRIVATE_CHAT: &str = "private";

/// Chat (group or private) identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
    pub title: Option<String>,
}

impl Chat {
    /// Private chat with the given id.
    pub fn private(id: i64) -> Self {
        Self {
            id,
            chat_type: PRIVATE_CHAT.to_string(),
            title: None,
        }
    }

    /// Group chat with the given id and title.
    pub fn group(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            chat_type: "group".to_string(),
            title: Some(title.into()),
        }
    }

    pub fn is_private(&self) -> bool {
        self.chat_type == PRIVATE_CHAT
    }
}
