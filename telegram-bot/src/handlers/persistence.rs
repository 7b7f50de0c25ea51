//! Saves session state after each reply.

use std::sync::Arc;

use async_trait::async_trait;
use bot_core::{Handler, HandlerResponse, Message, Result};
use tracing::warn;

use crate::state::BotState;

pub struct PersistenceHandler {
    state: Arc<BotState>,
}

impl PersistenceHandler {
    pub fn new(state: Arc<BotState>) -> Self {
        Self { state }
    }
}

#[async_trait]
impl Handler for PersistenceHandler {
    async fn after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        if response.reply_text().is_none() {
            return Ok(());
        }
        // A failed save keeps the in-memory state; the next reply retries.
        if let Err(e) = self.state.save_sessions().await {
            warn!(user_id = message.user.id, error = %e, "Failed to save sessions");
        }
        Ok(())
    }
}
