//! Message logging and the allow-list check.

use std::sync::Arc;

use async_trait::async_trait;
use bot_core::{Handler, HandlerResponse, Message, Result};
use tracing::{debug, info, instrument, warn};

use crate::state::BotState;

/// Logs each message in `before` and the response in `after`; always continues.
pub struct LoggingHandler;

#[async_trait]
impl Handler for LoggingHandler {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            username = %message.user.username.as_deref().unwrap_or("unknown"),
            is_reply = message.is_reply(),
            "Received message"
        );
        Ok(true)
    }

    async fn after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        debug!(message_id = %message.id, response = ?response, "Processed message");
        Ok(())
    }
}

/// Stops the chain for users and chats outside the allow-list. `/start` always passes so that
/// strangers get an explanation.
pub struct AccessHandler {
    state: Arc<BotState>,
}

impl AccessHandler {
    pub fn new(state: Arc<BotState>) -> Self {
        Self { state }
    }
}

#[async_trait]
impl Handler for AccessHandler {
    async fn before(&self, message: &Message) -> Result<bool> {
        if message.command() == Some("start") {
            return Ok(true);
        }
        let username = message.user.username_or_empty();
        let allowed = self.state.filters.read().await.allows(username, message.chat.id);
        if !allowed {
            warn!(
                user_id = message.user.id,
                chat_id = message.chat.id,
                "Message from unknown user or chat ignored"
            );
        }
        Ok(allowed)
    }
}
