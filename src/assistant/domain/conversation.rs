//! Chat log kept by a session.

use super::{AssistantError, AssistantReply};
use crate::task::domain::TaskId;
use serde::Serialize;

/// Author of a conversation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    /// The person asking.
    User,
    /// The assistant's answer.
    Assistant,
    /// A failed request, shown in place of an answer.
    Error,
}

/// One line of the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationEntry {
    /// Author.
    pub speaker: Speaker,
    /// Displayed text.
    pub text: String,
    /// Tasks suggested alongside an answer.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<TaskId>,
}

/// Append-only conversation log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Conversation {
    entries: Vec<ConversationEntry>,
}

impl Conversation {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the user's message.
    pub fn push_user(&mut self, text: impl Into<String>) {
        self.push(Speaker::User, text.into(), Vec::new());
    }

    /// Records an answer with its suggestions.
    pub fn push_reply(&mut self, reply: &AssistantReply) {
        self.push(
            Speaker::Assistant,
            reply.text.clone(),
            reply.suggestions.clone(),
        );
    }

    /// Records a failure as a chat-style error line.
    pub fn push_error(&mut self, err: &AssistantError) {
        self.push(Speaker::Error, err.user_message(), Vec::new());
    }

    /// Returns every entry, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[ConversationEntry] {
        &self.entries
    }

    /// Returns the newest entry.
    #[must_use]
    pub fn last(&self) -> Option<&ConversationEntry> {
        self.entries.last()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, speaker: Speaker, text: String, suggestions: Vec<TaskId>) {
        self.entries.push(ConversationEntry {
            speaker,
            text,
            suggestions,
        });
    }
}
