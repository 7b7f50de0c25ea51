//! Per-user and per-chat views over a [`Namespace`].

use chrono::Duration;

use crate::counter::ExpiringCounter;
use crate::history::ConversationHistory;
use crate::namespace::Namespace;
use crate::period::Period;
use crate::timestamped::TimestampedValue;

/// History depth used when no policy says otherwise.
pub const DEFAULT_HISTORY_DEPTH: usize = 3;

const MESSAGES: &str = "messages";
const MESSAGE_COUNTER: &str = "message_counter";
const MODEL: &str = "model";
const PROMPT: &str = "prompt";

/// Conversation policy values the session views need: history capacity and the counter period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPolicy {
    pub depth: usize,
    pub message_period: Duration,
}

impl SessionPolicy {
    pub fn new(depth: usize, period: Period) -> Self {
        Self {
            depth,
            message_period: period.duration(1),
        }
    }
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            depth: DEFAULT_HISTORY_DEPTH,
            message_period: Duration::zero(),
        }
    }
}

/// Data associated with one user: message history and message counter.
pub struct UserData<'a> {
    namespace: &'a mut Namespace,
    policy: SessionPolicy,
}

impl<'a> UserData<'a> {
    /// Binds to a user namespace, initializing the history and counter on first touch.
    pub fn new(namespace: &'a mut Namespace, policy: SessionPolicy) -> Self {
        let mut data = Self { namespace, policy };
        data.messages();
        data.message_counter();
        data
    }

    /// Past exchanges, capacity = policy depth.
    pub fn messages(&mut self) -> ConversationHistory<'_> {
        ConversationHistory::bind(self.namespace, MESSAGES, self.policy.depth)
    }

    /// Messages sent within the current limit period.
    pub fn message_counter(&mut self) -> ExpiringCounter<'_> {
        let value = TimestampedValue::get(self.namespace, MESSAGE_COUNTER, 0);
        ExpiringCounter::new(value, self.policy.message_period)
    }
}

/// Data associated with one chat: optional model and prompt overrides.
pub struct ChatData<'a> {
    namespace: &'a mut Namespace,
}

impl<'a> ChatData<'a> {
    pub fn new(namespace: &'a mut Namespace) -> Self {
        Self { namespace }
    }

    pub fn model(&self) -> Option<&str> {
        self.namespace.text(MODEL).filter(|s| !s.is_empty())
    }

    /// Sets the chat model; an empty name resets to the configured default.
    pub fn set_model(&mut self, model: &str) {
        self.set_override(MODEL, model);
    }

    pub fn prompt(&self) -> Option<&str> {
        self.namespace.text(PROMPT).filter(|s| !s.is_empty())
    }

    /// Sets the chat prompt; an empty prompt resets to the configured default.
    pub fn set_prompt(&mut self, prompt: &str) {
        self.set_override(PROMPT, prompt);
    }

    fn set_override(&mut self, name: &str, value: &str) {
        if value.is_empty() {
            self.namespace.remove_text(name);
        } else {
            self.namespace.set_text(name, value);
        }
    }
}
