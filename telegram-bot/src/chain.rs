//! # Handler chain
//!
//! All `before` hooks run in order (any `false` stops the chain), then `handle` runs until a
//! handler returns Stop or Reply, then all `after` hooks run in reverse with the final response.

use std::sync::Arc;

use bot_core::{Handler, HandlerResponse, Message, Result};
use tracing::{debug, info, instrument};

#[derive(Clone, Default)]
pub struct HandlerChain {
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    #[instrument(skip(self, message), fields(user_id = message.user.id, chat_id = message.chat.id))]
    pub async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        info!(message_id = %message.id, "step: handler_chain started");

        for h in &self.handlers {
            if !h.before(message).await? {
                let name = std::any::type_name_of_val(h.as_ref());
                info!(handler = %name, "step: before returned false, chain stopped");
                return Ok(HandlerResponse::Stop);
            }
        }

        let mut final_response = HandlerResponse::Continue;
        for h in &self.handlers {
            let response = h.handle(message).await?;
            let name = std::any::type_name_of_val(h.as_ref());
            debug!(handler = %name, response = ?response, "Handler processed");
            if matches!(response, HandlerResponse::Stop | HandlerResponse::Reply(_)) {
                info!(
                    handler = %name,
                    reply_len = ?response.reply_text().map(str::len),
                    "step: handler chain stopped by handler"
                );
                final_response = response;
                break;
            }
        }

        for h in self.handlers.iter().rev() {
            h.after(message, &final_response).await?;
        }

        info!(message_id = %message.id, "step: handler_chain finished");
        Ok(final_response)
    }
}
