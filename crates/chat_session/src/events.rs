//! Session events - inbound UI actions and what they produced

use std::fmt;

use branch_tree::{BranchLocator, ForkResult, Message, MessageId};
use serde::{Deserialize, Serialize};

/// Direction of a sibling-branch step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Prev,
    Next,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prev => write!(f, "previous"),
            Self::Next => write!(f, "next"),
        }
    }
}

/// Actions the UI can send to a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// User typed a new message.
    Submit { text: String },

    /// User rewrote an earlier message.
    Edit { message_id: MessageId, text: String },

    /// User pressed the prev/next arrow next to a forked message.
    Navigate {
        message_id: MessageId,
        direction: Direction,
    },

    /// User picked a message from search or history.
    Jump { message_id: MessageId },

    /// User asked for a fresh conversation.
    NewSession,
}

/// Result of handling one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Appended {
        message: Message,
        reply: Message,
    },
    Forked {
        fork: ForkResult,
        /// Present when the edited message was a user message.
        reply: Option<Message>,
    },
    Switched {
        origin: MessageId,
        branch_index: u32,
    },
    Jumped {
        path: Vec<BranchLocator>,
    },
    Reset,
}
