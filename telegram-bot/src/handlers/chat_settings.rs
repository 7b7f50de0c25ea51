//! `/model` and `/prompt`: per-chat overrides of the configured model and prompt.
//!
//! In groups only admins may use them; other members are silently ignored.

use std::sync::Arc;

use async_trait::async_trait;
use bot_core::{Handler, HandlerResponse, Message, Result};
use session::ChatData;
use tracing::info;

use crate::state::BotState;

const RESET: &str = "reset";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatSetting {
    Model,
    Prompt,
}

impl ChatSetting {
    fn command(&self) -> &'static str {
        match self {
            ChatSetting::Model => "model",
            ChatSetting::Prompt => "prompt",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ChatSetting::Model => "model",
            ChatSetting::Prompt => "custom prompt",
        }
    }

    fn help(&self) -> &'static str {
        match self {
            ChatSetting::Model => {
                "Syntax:\n<code>/model [AI model name]</code>\n\nFor example:\n<code>/model gpt-4o</code>\n\nTo use the default model:\n<code>/model reset</code>"
            }
            ChatSetting::Prompt => {
                "Syntax:\n<code>/prompt [custom prompt]</code>\n\nFor example:\n<code>/prompt You are an evil genius. Reply with an evil laugh.</code>\n\nTo use the default prompt:\n<code>/prompt reset</code>"
            }
        }
    }

    fn current(&self, chat: &ChatData<'_>) -> Option<String> {
        match self {
            ChatSetting::Model => chat.model(),
            ChatSetting::Prompt => chat.prompt(),
        }
        .map(str::to_string)
    }

    fn set(&self, chat: &mut ChatData<'_>, value: &str) {
        match self {
            ChatSetting::Model => chat.set_model(value),
            ChatSetting::Prompt => chat.set_prompt(value),
        }
    }
}

pub struct ChatSettingCommand {
    state: Arc<BotState>,
    setting: ChatSetting,
}

impl ChatSettingCommand {
    pub fn new(state: Arc<BotState>, setting: ChatSetting) -> Self {
        Self { state, setting }
    }
}

#[async_trait]
impl Handler for ChatSettingCommand {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let setting = self.setting;
        if message.command() != Some(setting.command()) {
            return Ok(HandlerResponse::Continue);
        }
        if !message.chat.is_private()
            && !self
                .state
                .filters
                .read()
                .await
                .is_admin(message.user.username_or_empty())
        {
            return Ok(HandlerResponse::Stop);
        }

        let value = message.command_args();
        let mut sessions = self.state.sessions.lock().await;
        let mut chat = ChatData::new(sessions.chat(message.chat.id));

        let reply = if value.is_empty() {
            match setting.current(&chat) {
                Some(current) => format!("Using {}:\n<code>{current}</code>", setting.label()),
                None => setting.help().to_string(),
            }
        } else if value == RESET {
            setting.set(&mut chat, "");
            let config = self.state.config.read().await;
            let default = match setting {
                ChatSetting::Model => &config.openai.model,
                ChatSetting::Prompt => &config.openai.prompt,
            };
            info!(chat_id = message.chat.id, setting = setting.command(), "Chat setting reset");
            format!("✓ Using default {}:\n<code>{default}</code>", setting.command())
        } else {
            setting.set(&mut chat, value);
            info!(chat_id = message.chat.id, setting = setting.command(), "Chat setting changed");
            format!("✓ Set {}:\n<code>{value}</code>", setting.label())
        };
        Ok(HandlerResponse::Reply(reply))
    }
}
