//! Session error types

use branch_tree::{ErrorKind, MessageId, TreeError};
use thiserror::Error;

use crate::events::Direction;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Message content cannot be empty")]
    EmptyContent,

    #[error("No {direction} branch at message {origin}")]
    NoSiblingBranch {
        origin: MessageId,
        direction: Direction,
    },

    #[error("Message {0} has no alternative branches on the active path")]
    NoAlternatives(MessageId),

    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),

    #[error("Response source error: {0}")]
    Responder(String),
}

impl SessionError {
    /// Taxonomy of the failure, `None` for response source failures.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::EmptyContent => Some(ErrorKind::InvalidOperation),
            Self::NoSiblingBranch { .. } | Self::NoAlternatives(_) => Some(ErrorKind::NotFound),
            Self::Tree(err) => Some(err.kind()),
            Self::Responder(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
