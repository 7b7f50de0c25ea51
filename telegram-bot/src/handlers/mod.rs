//! Handlers making up the bot's chain.

mod access;
mod ask;
mod chat_settings;
pub(crate) mod config_command;
mod imagine;
mod info;
mod persistence;
mod question;
mod retry;

use std::sync::Arc;

pub use access::{AccessHandler, LoggingHandler};
pub use chat_settings::{ChatSetting, ChatSettingCommand};
pub use config_command::ConfigCommand;
pub use imagine::ImagineCommand;
pub use info::{HelpCommand, StartCommand, VersionCommand};
pub use persistence::PersistenceHandler;
pub use question::QuestionHandler;
pub use retry::RetryCommand;

use crate::chain::HandlerChain;
use crate::state::BotState;

/// Commands listed by `/help`, in display order.
pub const BOT_COMMANDS: &[(&str, &str)] = &[
    ("retry", "retry the last question"),
    ("imagine", "generate described image"),
    ("version", "show debug information"),
    ("help", "show help"),
];

/// Commands only admins may use.
pub const ADMIN_COMMANDS: &[(&str, &str)] = &[("config", "view or edit the config")];

/// The full chain: logging and access first, commands next, free-form questions last.
pub fn build_chain(state: Arc<BotState>) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(AccessHandler::new(state.clone())))
        .add_handler(Arc::new(PersistenceHandler::new(state.clone())))
        .add_handler(Arc::new(StartCommand::new(state.clone())))
        .add_handler(Arc::new(HelpCommand::new(state.clone())))
        .add_handler(Arc::new(VersionCommand::new(state.clone())))
        .add_handler(Arc::new(ConfigCommand::new(state.clone())))
        .add_handler(Arc::new(ChatSettingCommand::new(state.clone(), ChatSetting::Model)))
        .add_handler(Arc::new(ChatSettingCommand::new(state.clone(), ChatSetting::Prompt)))
        .add_handler(Arc::new(RetryCommand::new(state.clone())))
        .add_handler(Arc::new(ImagineCommand::new(state.clone())))
        .add_handler(Arc::new(QuestionHandler::new(state)))
}
