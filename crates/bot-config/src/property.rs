//! Dotted property paths over the fixed configuration schema.
//!
//! Paths are matched segment by segment against the known records, so an unknown segment at any
//! level is a [`ConfigError::NoSuchProperty`]. Map-valued properties (`openai.params`, `shortcuts`)
//! accept any key as their last segment.

use crate::error::ConfigError;

/// Top-level properties that can never be set.
pub const READONLY: &[&str] = &["version", "schema_version"];

/// Top-level properties that can be set (immediate ∪ delayed).
pub const EDITABLE: &[&str] = &[
    "telegram",
    "openai",
    "conversation",
    "imagine",
    "persistence_path",
    "shortcuts",
];

/// Properties (and everything nested under them) that only take effect after a restart.
pub const DELAYED: &[&str] = &[
    "telegram.token",
    "openai.api_key",
    "openai.azure",
    "persistence_path",
];

/// How an edit to a property takes effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyClass {
    Readonly,
    Immediate,
    Delayed,
}

impl PropertyClass {
    /// Class of a dotted path, judged by its top-level segment and the delayed list.
    pub fn of(path: &str) -> Self {
        let top = path.split('.').next().unwrap_or(path);
        if READONLY.contains(&top) || !EDITABLE.contains(&top) {
            return PropertyClass::Readonly;
        }
        let delayed = DELAYED.iter().any(|d| {
            path == *d
                || path
                    .strip_prefix(d)
                    .is_some_and(|rest| rest.starts_with('.'))
        });
        if delayed {
            PropertyClass::Delayed
        } else {
            PropertyClass::Immediate
        }
    }

    pub fn is_editable(&self) -> bool {
        !matches!(self, PropertyClass::Readonly)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelegramField {
    Token,
    Usernames,
    Admins,
    ChatIds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AzureField {
    Endpoint,
    Version,
    Deployment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenAiField {
    ApiKey,
    Model,
    Prompt,
    /// `openai.params` or one parameter.
    Params(Option<String>),
    /// `openai.azure` or one of its fields.
    Azure(Option<AzureField>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLimitField {
    Count,
    Period,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationField {
    Depth,
    MessageLimit(Option<MessageLimitField>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImagineField {
    Enabled,
}

/// A resolved property path. `None` in a record variant addresses the whole record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Property {
    Version,
    SchemaVersion,
    Telegram(Option<TelegramField>),
    OpenAi(Option<OpenAiField>),
    Conversation(Option<ConversationField>),
    Imagine(Option<ImagineField>),
    PersistencePath,
    Shortcuts(Option<String>),
}

impl Property {
    pub fn parse(path: &str) -> Result<Self, ConfigError> {
        let no_such = || ConfigError::NoSuchProperty(path.to_string());
        let segments: Vec<&str> = path.split('.').collect();
        let property = match segments.as_slice() {
            ["version"] => Property::Version,
            ["schema_version"] => Property::SchemaVersion,

            ["telegram"] => Property::Telegram(None),
            ["telegram", field] => Property::Telegram(Some(match *field {
                "token" => TelegramField::Token,
                "usernames" => TelegramField::Usernames,
                "admins" => TelegramField::Admins,
                "chat_ids" => TelegramField::ChatIds,
                _ => return Err(no_such()),
            })),

            ["openai"] => Property::OpenAi(None),
            ["openai", "params"] => Property::OpenAi(Some(OpenAiField::Params(None))),
            ["openai", "params", key] if !key.is_empty() => {
                Property::OpenAi(Some(OpenAiField::Params(Some(key.to_string()))))
            }
            ["openai", "azure"] => Property::OpenAi(Some(OpenAiField::Azure(None))),
            ["openai", "azure", field] => Property::OpenAi(Some(OpenAiField::Azure(Some(
                match *field {
                    "endpoint" => AzureField::Endpoint,
                    "version" => AzureField::Version,
                    "deployment" => AzureField::Deployment,
                    _ => return Err(no_such()),
                },
            )))),
            ["openai", field] => Property::OpenAi(Some(match *field {
                "api_key" => OpenAiField::ApiKey,
                "model" => OpenAiField::Model,
                "prompt" => OpenAiField::Prompt,
                _ => return Err(no_such()),
            })),

            ["conversation"] => Property::Conversation(None),
            ["conversation", "depth"] => Property::Conversation(Some(ConversationField::Depth)),
            ["conversation", "message_limit"] => {
                Property::Conversation(Some(ConversationField::MessageLimit(None)))
            }
            ["conversation", "message_limit", field] => {
                Property::Conversation(Some(ConversationField::MessageLimit(Some(match *field {
                    "count" => MessageLimitField::Count,
                    "period" => MessageLimitField::Period,
                    _ => return Err(no_such()),
                }))))
            }

            ["imagine"] => Property::Imagine(None),
            ["imagine", "enabled"] => Property::Imagine(Some(ImagineField::Enabled)),

            ["persistence_path"] => Property::PersistencePath,

            ["shortcuts"] => Property::Shortcuts(None),
            ["shortcuts", name] if !name.is_empty() => Property::Shortcuts(Some(name.to_string())),

            _ => return Err(no_such()),
        };
        Ok(property)
    }

    /// True for properties holding a map whose missing keys read as absent.
    pub fn is_map_entry(&self) -> bool {
        matches!(
            self,
            Property::Shortcuts(Some(_)) | Property::OpenAi(Some(OpenAiField::Params(Some(_))))
        )
    }
}
