//! Who may talk to the bot.
//!
//! With an empty `telegram.usernames` list everyone is allowed. Otherwise a message passes when its
//! sender is listed or it comes from a listed chat.

use std::collections::HashSet;

use bot_config::Telegram;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FilterError {
    #[error("Restart the bot for changes to take effect")]
    RestartRequired,
}

#[derive(Debug, Clone)]
pub struct Filters {
    allow_all: bool,
    usernames: HashSet<String>,
    admins: HashSet<String>,
    chat_ids: HashSet<i64>,
}

impl Filters {
    pub fn new(telegram: &Telegram) -> Self {
        let filters = Self {
            allow_all: telegram.usernames.is_empty(),
            usernames: telegram.usernames.iter().cloned().collect(),
            admins: telegram.admins.iter().cloned().collect(),
            chat_ids: telegram.chat_ids.iter().copied().collect(),
        };
        info!(
            allow_all = filters.allow_all,
            usernames = filters.usernames.len(),
            admins = filters.admins.len(),
            chats = filters.chat_ids.len(),
            "Filters initialized"
        );
        filters
    }

    pub fn allows(&self, username: &str, chat_id: i64) -> bool {
        self.allow_all || self.usernames.contains(username) || self.chat_ids.contains(&chat_id)
    }

    /// Listed users are exempt from the message limit. Nobody is listed when everyone is allowed.
    pub fn is_known_user(&self, username: &str) -> bool {
        !self.allow_all && self.usernames.contains(username)
    }

    pub fn is_admin(&self, username: &str) -> bool {
        self.admins.contains(username)
    }

    /// Picks up edited lists. Going from "everyone" to a user list needs a restart.
    pub fn reload(&mut self, telegram: &Telegram) -> Result<(), FilterError> {
        if self.allow_all && !telegram.usernames.is_empty() {
            return Err(FilterError::RestartRequired);
        }
        self.usernames = telegram.usernames.iter().cloned().collect();
        self.admins = telegram.admins.iter().cloned().collect();
        self.chat_ids = telegram.chat_ids.iter().copied().collect();
        info!(usernames = self.usernames.len(), "Filters reloaded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn telegram(usernames: &[&str], admins: &[&str], chat_ids: &[i64]) -> Telegram {
        Telegram {
            token: "tg".into(),
            usernames: usernames.iter().map(|s| s.to_string()).collect(),
            admins: admins.iter().map(|s| s.to_string()).collect(),
            chat_ids: chat_ids.to_vec(),
        }
    }

    #[test]
    fn test_allow_all() {
        let filters = Filters::new(&telegram(&[], &["root"], &[]));
        assert!(filters.allows("anyone", 1));
        assert!(!filters.is_known_user("anyone"));
        assert!(filters.is_admin("root"));
        assert!(!filters.is_admin("anyone"));
    }

    #[test]
    fn test_users_or_chats() {
        let filters = Filters::new(&telegram(&["alice"], &[], &[-100500]));
        assert!(filters.allows("alice", 1));
        assert!(filters.allows("bob", -100500));
        assert!(!filters.allows("bob", 1));
        assert!(filters.is_known_user("alice"));
        assert!(!filters.is_known_user("bob"));
    }

    #[test]
    fn test_reload() {
        let mut filters = Filters::new(&telegram(&["alice"], &[], &[]));
        filters.reload(&telegram(&["alice", "bob"], &["bob"], &[])).unwrap();
        assert!(filters.allows("bob", 1));
        assert!(filters.is_admin("bob"));

        let mut open = Filters::new(&telegram(&[], &[], &[]));
        assert_eq!(
            open.reload(&telegram(&["alice"], &[], &[])),
            Err(FilterError::RestartRequired)
        );
        assert!(open.allows("bob", 1));
    }
}
