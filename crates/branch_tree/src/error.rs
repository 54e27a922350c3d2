//! Tree error types

use chat_core::MessageId;
use thiserror::Error;

/// Errors returned by tree operations. A failed operation leaves the tree unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("Message not found: {0}")]
    MessageNotFound(MessageId),

    #[error("Branch {index} not found for message {origin}")]
    BranchNotFound { origin: MessageId, index: u32 },

    #[error("Message {0} is not on the active path")]
    NotOnActivePath(MessageId),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("No message matches '{0}'")]
    NoMatch(String),

    #[error("Ambiguous message id '{query}': matches {candidates:?}")]
    Ambiguous {
        query: String,
        candidates: Vec<String>,
    },
}

/// Coarse failure taxonomy surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A message id or branch index does not exist
    NotFound,
    /// The request is well-formed but not allowed in the current state
    InvalidOperation,
}

impl TreeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MessageNotFound(_) | Self::BranchNotFound { .. } | Self::NoMatch(_) => {
                ErrorKind::NotFound
            }
            Self::NotOnActivePath(_) | Self::InvalidPath(_) | Self::Ambiguous { .. } => {
                ErrorKind::InvalidOperation
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, TreeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let id = MessageId::new();
        assert_eq!(TreeError::MessageNotFound(id).kind(), ErrorKind::NotFound);
        assert_eq!(
            TreeError::BranchNotFound { origin: id, index: 4 }.kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            TreeError::NotOnActivePath(id).kind(),
            ErrorKind::InvalidOperation
        );
        assert_eq!(
            TreeError::InvalidPath("empty".into()).kind(),
            ErrorKind::InvalidOperation
        );
    }

    #[test]
    fn test_error_display() {
        let id = MessageId::new();
        let err = TreeError::BranchNotFound { origin: id, index: 7 };
        assert_eq!(err.to_string(), format!("Branch 7 not found for message {id}"));
    }
}
