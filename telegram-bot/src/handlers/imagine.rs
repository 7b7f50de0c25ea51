//! `/imagine description [size]`: image generation.

use std::sync::Arc;

use async_trait::async_trait;
use bot_core::{Handler, HandlerResponse, Message, Result};
use tracing::info;

use super::ask::{reply_to, Asker};
use crate::state::BotState;

pub const IMAGINE_DISABLED: &str = "The `imagine` command is disabled.";

pub const IMAGINE_HELP: &str =
    "Please describe an image. For example:\n<code>/imagine a lazy cat on a sunny day</code>";

pub struct ImagineCommand {
    state: Arc<BotState>,
}

impl ImagineCommand {
    pub fn new(state: Arc<BotState>) -> Self {
        Self { state }
    }
}

#[async_trait]
impl Handler for ImagineCommand {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.command() != Some("imagine") {
            return Ok(HandlerResponse::Continue);
        }
        let mode = self.state.config.read().await.imagine.enabled;
        if !mode.allows(message.chat.is_private()) {
            info!(chat_id = message.chat.id, mode = mode.as_str(), "Imagine is disabled here");
            return Ok(HandlerResponse::Reply(IMAGINE_DISABLED.to_string()));
        }
        if message.command_args().is_empty() {
            return Ok(HandlerResponse::Reply(IMAGINE_HELP.to_string()));
        }
        Ok(reply_to(&self.state, message, &message.content, Asker::Image).await)
    }
}
