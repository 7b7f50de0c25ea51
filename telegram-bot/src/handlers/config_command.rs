//! `/config property [value]`: view or change config properties. Admins only, private chats only.

use std::sync::Arc;

use async_trait::async_trait;
use bot_config::{ConfigEditor, ConfigError};
use bot_core::{BotError, Handler, HandlerResponse, Message, Result};
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::state::BotState;

pub const CONFIG_HELP: &str = "Syntax:\n<code>/config property [value]</code>\n\nE.g. to view the property value:\n<code>/config openai.prompt</code>\n\nE.g. to change the property value:\n<code>/config openai.prompt You are an AI assistant</code>";

pub const RESTART_NOTICE: &str = "❗️Restart the bot for changes to take effect.";

const FILTER_PROPERTIES: [&str; 3] = ["telegram.usernames", "telegram.chat_ids", "telegram.admins"];

/// Renders a property value for a reply; absent values show as `(empty)`.
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "(empty)".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

pub struct ConfigCommand {
    state: Arc<BotState>,
}

impl ConfigCommand {
    pub fn new(state: Arc<BotState>) -> Self {
        Self { state }
    }

    async fn run(&self, args: &str) -> std::result::Result<String, ConfigError> {
        let mut parts = args.split_whitespace();
        let Some(property) = parts.next() else {
            return Ok(CONFIG_HELP.to_string());
        };
        let new_value = parts.collect::<Vec<_>>().join(" ");

        let mut config = self.state.config.write().await;
        // Edits go to a copy that replaces the live config only once it is saved.
        let mut draft = config.clone();
        let mut editor = ConfigEditor::new(&mut draft, &self.state.config_file);
        let old = display_value(editor.get_value(property)?.as_ref());
        if new_value.is_empty() {
            return Ok(format!("`{old}`"));
        }

        let outcome = editor.set_value(property, &new_value)?;
        if !outcome.changed {
            return Ok(format!(
                "✗ The `{property}` property already equals to `{new_value}`"
            ));
        }
        editor.save()?;
        *config = draft;

        let mut text = format!(
            "✓ Changed the `{property}` property: `{old}` → `{}`",
            display_value(outcome.value.as_ref())
        );
        let mut needs_restart = !outcome.immediate;
        if FILTER_PROPERTIES.contains(&property) {
            if let Err(e) = self.state.filters.write().await.reload(&config.telegram) {
                warn!(property, error = %e, "Filters not reloaded");
                needs_restart = true;
            }
        }
        if needs_restart {
            text.push('\n');
            text.push_str(RESTART_NOTICE);
        }
        Ok(text)
    }
}

#[async_trait]
impl Handler for ConfigCommand {
    #[instrument(skip(self, message), fields(user_id = message.user.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.command() != Some("config") {
            return Ok(HandlerResponse::Continue);
        }
        let is_admin = self
            .state
            .filters
            .read()
            .await
            .is_admin(message.user.username_or_empty());
        if !is_admin || !message.chat.is_private() {
            info!("Config command from a non-admin or in a group ignored");
            return Ok(HandlerResponse::Stop);
        }

        match self.run(message.command_args()).await {
            Ok(text) => Ok(HandlerResponse::Reply(text)),
            Err(e) if e.is_validation() => Ok(HandlerResponse::Reply(format!("⚠️ {e}"))),
            Err(e) => Err(BotError::Config(e.to_string())),
        }
    }
}
