//! Message - Immutable chat message record
//!
//! A message is never changed after creation. Editing produces a new
//! message that points back at the one it replaces.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::sender::Sender;
use crate::ids::MessageId;

/// A single message in a conversation timeline
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Message {
    /// Unique identifier
    pub id: MessageId,

    /// Text payload
    pub content: String,

    /// Author of the message
    pub sender: Sender,

    /// True only for the first message of a forked branch
    #[serde(default)]
    pub is_edited: bool,

    /// The message this one replaces, set on edited messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_message_id: Option<MessageId>,

    /// When this message was created
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a new, unedited message
    pub fn new(sender: Sender, content: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            content: content.into(),
            sender,
            is_edited: false,
            original_message_id: None,
            created_at: Utc::now(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Sender::User, content)
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Sender::Assistant, content)
    }

    /// Create the replacement for `self` carrying `content`.
    ///
    /// The replacement keeps the original sender, gets a fresh id, and is
    /// marked as edited.
    pub fn edited(&self, content: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            content: content.into(),
            sender: self.sender,
            is_edited: true,
            original_message_id: Some(self.id),
            created_at: Utc::now(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }

    /// Content preview for logs and compact displays
    pub fn preview(&self, max_chars: usize) -> String {
        let mut chars = self.content.chars();
        let head: String = chars.by_ref().take(max_chars).collect();
        if chars.next().is_some() {
            format!("{head}...")
        } else {
            head
        }
    }
}
