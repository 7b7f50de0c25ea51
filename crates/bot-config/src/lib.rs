//! # Bot configuration
//!
//! - [`Config`]: typed configuration (Telegram, OpenAI, conversation policy, image generation,
//!   persistence, shortcuts) with declared defaults.
//! - [`ConfigEditor`]: get/set by dotted property path (`openai.params.temperature`), with type
//!   preservation, `+item` / `-item` list edits, and readonly / immediate / delayed classes.
//! - [`migrate`]: sequential upgrade of raw config data to [`CURRENT_SCHEMA_VERSION`].
//! - [`ConfigFile`]: TOML storage; loading migrates and rewrites outdated files.

mod defaults;
mod editor;
mod error;
mod file;
mod literal;
mod migrate;
mod property;
mod schema;

pub use defaults::{
    default_params, BOT_VERSION, DEFAULT_DEPTH, DEFAULT_MODEL, DEFAULT_PERSISTENCE_PATH,
    DEFAULT_PROMPT,
};
pub use editor::{ConfigEditor, SetOutcome};
pub use error::ConfigError;
pub use file::{ConfigFile, DEFAULT_CONFIG_PATH};
pub use literal::parse_literal;
pub use migrate::{migrate, CURRENT_SCHEMA_VERSION};
pub use property::{Property, PropertyClass, DELAYED, EDITABLE, READONLY};
pub use schema::{
    AzureOptions, Config, Conversation, Imagine, ImagineMode, MessageLimit, OpenAi, Telegram,
};
pub use session::Period;
