//! All session namespaces of the bot, keyed by user id and chat id, with JSON file persistence.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::SessionError;
use crate::namespace::Namespace;

/// User and chat namespaces. Namespaces are created empty on first access.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStore {
    #[serde(default)]
    users: HashMap<i64, Namespace>,
    #[serde(default)]
    chats: HashMap<i64, Namespace>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(&mut self, user_id: i64) -> &mut Namespace {
        self.users.entry(user_id).or_default()
    }

    pub fn chat(&mut self, chat_id: i64) -> &mut Namespace {
        self.chats.entry(chat_id).or_default()
    }

    /// Both namespaces at once, for flows that read chat overrides while updating user history.
    pub fn user_and_chat(&mut self, user_id: i64, chat_id: i64) -> (&mut Namespace, &mut Namespace) {
        (
            self.users.entry(user_id).or_default(),
            self.chats.entry(chat_id).or_default(),
        )
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn chat_count(&self) -> usize {
        self.chats.len()
    }

    /// Loads the store from a JSON file. A missing file yields an empty store.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "session file not found, starting empty");
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path)?;
        let store: Self = serde_json::from_str(&data)?;
        info!(
            path = %path.display(),
            users = store.users.len(),
            chats = store.chats.len(),
            "Loaded session store"
        );
        Ok(store)
    }

    /// Writes the store as JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let data = serde_json::to_string_pretty(self)?;
        std::fs::write(path, data)?;
        debug!(path = %path.display(), "Saved session store");
        Ok(())
    }
}
