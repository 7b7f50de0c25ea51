//! Extracting the question from an incoming message and preparing it for the model.

use std::collections::BTreeMap;

use bot_core::Message;

use crate::shortcuts::{self, ShortcutError};

/// The question a message asks the bot, or `None` when the bot should stay silent.
///
/// In private chats every message is a question; replying to any message marks a follow-up.
/// In groups a reply to the bot is a follow-up, and otherwise the message must start with the
/// bot's `@mention`. A mention that replies to another message asks about that message.
pub fn extract_question(message: &Message, bot_username: &str) -> Option<String> {
    let text = message.content.trim();

    let question = if message.chat.is_private() {
        if message.is_reply() {
            format!("+ {text}")
        } else {
            text.to_string()
        }
    } else if message.is_reply() && message.reply_to_message_from_bot {
        format!("+ {text}")
    } else {
        let mention = format!("@{bot_username}");
        let rest = text.strip_prefix(mention.as_str())?;
        if rest.starts_with(|c: char| c.is_alphanumeric() || c == '_') {
            return None;
        }
        let question = rest.trim();
        match message.reply_to_message_content.as_deref().filter(|_| message.is_reply()) {
            Some(quoted) if question.is_empty() => quoted.to_string(),
            Some(quoted) => format!("{question}: {quoted}"),
            None => question.to_string(),
        }
    };

    let question = question.trim().to_string();
    (!question.is_empty() && question != "+").then_some(question)
}

/// Strips the follow-up marker, applies a shortcut or drops a leading command word.
///
/// Returns the question to ask and whether it continues the previous conversation.
pub fn prepare(
    question: &str,
    shortcuts: &BTreeMap<String, String>,
) -> Result<(String, bool), ShortcutError> {
    let mut question = question.trim();
    let is_follow_up = question.starts_with('+');
    if is_follow_up {
        question = question.trim_start_matches(['+', ' ']).trim();
    }

    let question = if question.starts_with('!') {
        let (name, rest) = shortcuts::extract(question)?;
        shortcuts::apply(name, rest, shortcuts)?
    } else if question.starts_with('/') {
        question
            .split_once(char::is_whitespace)
            .map(|(_, rest)| rest.trim())
            .unwrap_or("")
            .to_string()
    } else {
        question.to_string()
    };

    Ok((question, is_follow_up))
}
