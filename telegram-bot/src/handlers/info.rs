//! `/start`, `/help` and `/version`.

use std::fmt::Write as _;
use std::sync::Arc;

use async_trait::async_trait;
use bot_config::Config;
use bot_core::{Handler, HandlerResponse, Message, Result};

use super::{ADMIN_COMMANDS, BOT_COMMANDS};
use crate::state::BotState;

const HELP_INTRO: &str = "Send me a question, and I will do my best to answer it. Please be specific, as I'm not very clever.\n\nI don't remember chat context by default. To ask follow-up questions, reply to my messages or start your questions with a '+' sign.";

pub const UNKNOWN_USER: &str = "Sorry, I don't know you. Ask the bot owner to add your username to the allowed users.";

/// Help text: intro, commands (admin commands for admins) and configured shortcuts.
pub fn help_message(config: &Config, is_admin: bool) -> String {
    let mut text = format!("{HELP_INTRO}\n\nBuilt-in commands:\n");
    for (command, description) in BOT_COMMANDS {
        let _ = writeln!(text, "/{command} - {description}");
    }
    if is_admin {
        text.push_str("\nAdmin-only commands:\n");
        for (command, description) in ADMIN_COMMANDS {
            let _ = writeln!(text, "/{command} - {description}");
        }
    }
    text.push_str("\nAI shortcuts:\n");
    if config.shortcuts.is_empty() {
        text.push_str("none");
    } else {
        let names: Vec<String> = config.shortcuts.keys().map(|name| format!("`!{name}`")).collect();
        text.push_str(&names.join("\n"));
    }
    text
}

/// Chat, bot and AI information for `/version`.
pub fn version_message(config: &Config, message: &Message, bot_username: &str) -> String {
    let chat = &message.chat;
    let telegram = &config.telegram;
    let usernames = if telegram.usernames.is_empty() {
        "all".to_string()
    } else {
        format!("{} users", telegram.usernames.len())
    };
    let admins = if telegram.admins.is_empty() {
        "none".to_string()
    } else {
        format!("{} users", telegram.admins.len())
    };
    let shortcuts: Vec<&str> = config.shortcuts.keys().map(String::as_str).collect();

    format!(
        "<pre>Chat information:\n- id: {}\n- title: {}\n- type: {}</pre>\n\n\
         <pre>Bot information:\n- name: @{bot_username}\n- version: {}\n- usernames: {usernames}\n- admins: {admins}\n- chat IDs: {:?}</pre>\n\n\
         <pre>AI information:\n- model: {}\n- history depth: {}\n- imagine: {}\n- shortcuts: {}</pre>",
        chat.id,
        chat.title.as_deref().unwrap_or("None"),
        chat.chat_type,
        config.version,
        telegram.chat_ids,
        config.openai.model,
        config.conversation.depth,
        config.imagine.enabled.as_str(),
        shortcuts.join(", "),
    )
}

pub struct StartCommand {
    state: Arc<BotState>,
}

impl StartCommand {
    pub fn new(state: Arc<BotState>) -> Self {
        Self { state }
    }
}

#[async_trait]
impl Handler for StartCommand {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.command() != Some("start") {
            return Ok(HandlerResponse::Continue);
        }
        let username = message.user.username_or_empty();
        let (allowed, is_admin) = {
            let filters = self.state.filters.read().await;
            (filters.allows(username, message.chat.id), filters.is_admin(username))
        };
        if !allowed {
            return Ok(HandlerResponse::Reply(UNKNOWN_USER.to_string()));
        }
        let config = self.state.config.read().await;
        let text = format!(
            "Hi! I'm a humble AI-driven chat bot.\n\n{}",
            help_message(&config, is_admin)
        );
        Ok(HandlerResponse::Reply(text))
    }
}

pub struct HelpCommand {
    state: Arc<BotState>,
}

impl HelpCommand {
    pub fn new(state: Arc<BotState>) -> Self {
        Self { state }
    }
}

#[async_trait]
impl Handler for HelpCommand {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.command() != Some("help") {
            return Ok(HandlerResponse::Continue);
        }
        let is_admin = self
            .state
            .filters
            .read()
            .await
            .is_admin(message.user.username_or_empty());
        let config = self.state.config.read().await;
        Ok(HandlerResponse::Reply(help_message(&config, is_admin)))
    }
}

pub struct VersionCommand {
    state: Arc<BotState>,
}

impl VersionCommand {
    pub fn new(state: Arc<BotState>) -> Self {
        Self { state }
    }
}

#[async_trait]
impl Handler for VersionCommand {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.command() != Some("version") {
            return Ok(HandlerResponse::Continue);
        }
        let config = self.state.config.read().await;
        Ok(HandlerResponse::Reply(version_message(
            &config,
            message,
            &self.state.bot_username,
        )))
    }
}
