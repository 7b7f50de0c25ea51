//! Bounded per-user question/answer history.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::namespace::Namespace;

/// One completed exchange: a question and the answer to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMessage {
    pub question: String,
    pub answer: String,
}

impl UserMessage {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

impl From<(&str, &str)> for UserMessage {
    fn from((question, answer): (&str, &str)) -> Self {
        Self::new(question, answer)
    }
}

/// FIFO queue of [`UserMessage`] holding at most `depth` entries; oldest entries are evicted first.
///
/// Binding with a smaller depth than the stored queue drops the oldest entries, matching normal
/// eviction; binding with a larger depth keeps everything.
pub struct ConversationHistory<'a> {
    messages: &'a mut VecDeque<UserMessage>,
    depth: usize,
}

impl<'a> ConversationHistory<'a> {
    /// Binds to the queue stored under `name`, creating an empty one when absent.
    pub fn bind(namespace: &'a mut Namespace, name: &str, depth: usize) -> Self {
        let messages = namespace.messages_or_default(name);
        let mut history = Self { messages, depth };
        history.truncate();
        history
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Appends an exchange, evicting the oldest one once the queue is full.
    pub fn add(&mut self, question: impl Into<String>, answer: impl Into<String>) {
        self.messages.push_back(UserMessage::new(question, answer));
        self.truncate();
    }

    /// Most recent exchange, if any.
    pub fn last(&self) -> Option<&UserMessage> {
        self.messages.back()
    }

    /// Removes and returns the most recent exchange.
    pub fn pop(&mut self) -> Option<UserMessage> {
        self.messages.pop_back()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Oldest-first snapshot.
    pub fn as_list(&self) -> Vec<UserMessage> {
        self.messages.iter().cloned().collect()
    }

    fn truncate(&mut self) {
        while self.messages.len() > self.depth {
            self.messages.pop_front();
        }
    }
}
