//! Default configuration values.

use std::collections::BTreeMap;

use serde_json::{json, Value};

/// Bot build version reported by `/version`; readonly, never persisted.
pub const BOT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

pub const DEFAULT_PROMPT: &str = "Your primary goal is to answer my questions. This may involve writing code or providing helpful information. Be detailed and thorough in your responses.";

pub const DEFAULT_DEPTH: usize = 3;

pub const DEFAULT_PERSISTENCE_PATH: &str = "./data/persistence.json";

/// Model request parameters applied before user overrides.
pub fn default_params() -> BTreeMap<String, Value> {
    BTreeMap::from([
        ("temperature".to_string(), json!(0.7)),
        ("presence_penalty".to_string(), json!(0)),
        ("frequency_penalty".to_string(), json!(0)),
        ("max_tokens".to_string(), json!(1000)),
    ])
}
