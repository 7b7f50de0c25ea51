//! `/retry`: ask the last question again.

use std::sync::Arc;

use async_trait::async_trait;
use bot_core::{Handler, HandlerResponse, Message, Result};
use session::UserData;

use super::ask::{reply_to, Asker};
use crate::state::BotState;

pub struct RetryCommand {
    state: Arc<BotState>,
}

impl RetryCommand {
    pub fn new(state: Arc<BotState>) -> Self {
        Self { state }
    }
}

#[async_trait]
impl Handler for RetryCommand {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.command() != Some("retry") {
            return Ok(HandlerResponse::Continue);
        }
        let policy = self.state.config.read().await.session_policy();
        let last = {
            let mut sessions = self.state.sessions.lock().await;
            let mut user = UserData::new(sessions.user(message.user.id), policy);
            let last = user.messages().pop();
            last
        };
        let Some(last) = last else {
            return Ok(HandlerResponse::Reply("No message to retry 🤷‍♂️".to_string()));
        };
        // Asked as a fresh question: the history is cleared, like any non-follow-up.
        Ok(reply_to(&self.state, message, &last.question, Asker::Text).await)
    }
}
