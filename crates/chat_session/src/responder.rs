//! Pluggable source of assistant replies

use async_trait::async_trait;
use branch_tree::{Message, Sender};

use crate::error::Result;

/// Produces the assistant's next reply from the visible conversation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResponseSource: Send + Sync {
    /// `history` is the tail of the active chain, oldest first.
    async fn respond(&self, history: &[Message]) -> Result<String>;
}

/// Replies with the latest user message behind a fixed prefix.
#[derive(Debug, Clone)]
pub struct EchoResponder {
    prefix: String,
}

impl EchoResponder {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for EchoResponder {
    fn default() -> Self {
        Self::new("echo: ")
    }
}

#[async_trait]
impl ResponseSource for EchoResponder {
    async fn respond(&self, history: &[Message]) -> Result<String> {
        let last_user = history
            .iter()
            .rev()
            .find(|m| m.sender == Sender::User)
            .map_or("", |m| m.content.as_str());
        Ok(format!("{}{}", self.prefix, last_user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_echo_uses_latest_user_message() {
        let responder = EchoResponder::new("> ");
        let history = vec![
            Message::user("first"),
            Message::assistant("ok"),
            Message::user("second"),
            Message::assistant("ok again"),
        ];

        assert_eq!(responder.respond(&history).await.unwrap(), "> second");
    }

    #[tokio::test]
    async fn test_echo_without_user_message() {
        let responder = EchoResponder::default();
        assert_eq!(responder.respond(&[]).await.unwrap(), "echo: ");
    }
}
