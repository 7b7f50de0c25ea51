//! Caller-owned key-value namespace backing the session views.

use std::collections::{BTreeMap, VecDeque};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::history::UserMessage;

/// A value paired with the time it was last written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stamped {
    pub value: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

impl Stamped {
    /// Stamped value written now.
    pub fn new(value: serde_json::Value) -> Self {
        Self {
            value,
            timestamp: Utc::now(),
        }
    }

    /// Stamped value with an explicit write time (restoring persisted state, tests).
    pub fn at(value: serde_json::Value, timestamp: DateTime<Utc>) -> Self {
        Self { value, timestamp }
    }
}

/// Per-participant key-value store. One namespace per user id and one per chat id.
///
/// Keys live in separate maps per value kind, so a name bound as a counter never
/// collides with a history or text entry of the same name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Namespace {
    #[serde(default)]
    stamped: BTreeMap<String, Stamped>,
    #[serde(default)]
    messages: BTreeMap<String, VecDeque<UserMessage>>,
    #[serde(default)]
    texts: BTreeMap<String, String>,
}

impl Namespace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.stamped.is_empty() && self.messages.is_empty() && self.texts.is_empty()
    }

    pub fn stamped(&self, name: &str) -> Option<&Stamped> {
        self.stamped.get(name)
    }

    pub fn insert_stamped(&mut self, name: impl Into<String>, value: Stamped) -> Option<Stamped> {
        self.stamped.insert(name.into(), value)
    }

    /// Existing stamped entry, or a new one from `init`.
    pub(crate) fn stamped_or_insert_with(
        &mut self,
        name: &str,
        init: impl FnOnce() -> Stamped,
    ) -> &mut Stamped {
        self.stamped.entry(name.to_string()).or_insert_with(init)
    }

    pub fn messages(&self, name: &str) -> Option<&VecDeque<UserMessage>> {
        self.messages.get(name)
    }

    pub fn insert_messages(
        &mut self,
        name: impl Into<String>,
        messages: VecDeque<UserMessage>,
    ) -> Option<VecDeque<UserMessage>> {
        self.messages.insert(name.into(), messages)
    }

    pub(crate) fn messages_or_default(&mut self, name: &str) -> &mut VecDeque<UserMessage> {
        self.messages.entry(name.to_string()).or_default()
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.texts.get(name).map(String::as_str)
    }

    pub fn set_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.texts.insert(name.into(), value.into());
    }

    pub fn remove_text(&mut self, name: &str) -> Option<String> {
        self.texts.remove(name)
    }
}
