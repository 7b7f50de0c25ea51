//! Free-form questions: any message that is not a command.

use std::sync::Arc;

use async_trait::async_trait;
use bot_core::{Handler, HandlerResponse, Message, Result};
use tracing::{debug, instrument};

use super::ask::{reply_to, Asker};
use crate::questions::extract_question;
use crate::state::BotState;

pub struct QuestionHandler {
    state: Arc<BotState>,
}

impl QuestionHandler {
    pub fn new(state: Arc<BotState>) -> Self {
        Self { state }
    }
}

#[async_trait]
impl Handler for QuestionHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.command().is_some() {
            return Ok(HandlerResponse::Continue);
        }
        let Some(question) = extract_question(message, &self.state.bot_username) else {
            debug!("No question extracted, ignoring message");
            return Ok(HandlerResponse::Continue);
        };
        Ok(reply_to(&self.state, message, &question, Asker::Text).await)
    }
}
