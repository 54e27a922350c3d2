use chat_core::{Message, Sender};

use crate::structs::tree::ChatTree;

impl ChatTree {
    /// Append a new message to the leaf of the active chain.
    pub fn add_message(&mut self, content: impl Into<String>, sender: Sender) -> Message {
        let message = Message::new(sender, content);
        let leaf = self.leaf().id();
        debug_assert!(self.node(leaf).is_leaf(), "active chain must end at a leaf");

        tracing::info!(
            message_id = %message.id,
            sender = %sender,
            branch = %self.node(leaf).locator(),
            content_len = message.content.len(),
            "ChatTree: Adding message"
        );

        let branch = self.node_mut(leaf);
        branch.messages.push(message.clone());

        tracing::debug!(
            branch_message_count = branch.messages.len(),
            "ChatTree: Message added"
        );

        message
    }

    /// Discard the whole conversation and start again from an empty root.
    pub fn start_new(&mut self) {
        tracing::info!(
            discarded_branches = self.branch_count(),
            discarded_messages = self.message_count(),
            "ChatTree: Starting new conversation"
        );
        *self = ChatTree::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_message_appends_in_order() {
        let mut tree = ChatTree::new();
        let a = tree.add_message("hi", Sender::Assistant);
        let b = tree.add_message("how are you", Sender::User);

        let ids: Vec<_> = tree.root().messages().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
        assert_eq!(tree.current_path().len(), 1);
    }

    #[test]
    fn test_start_new_resets_everything() {
        let mut tree = ChatTree::new();
        let first = tree.add_message("one", Sender::User);
        tree.add_message("two", Sender::Assistant);
        tree.edit_message(first.id, "uno").unwrap();

        tree.start_new();

        assert_eq!(tree.branch_count(), 1);
        assert_eq!(tree.message_count(), 0);
        assert_eq!(tree.current_path(), vec![crate::BranchLocator::Root]);
        assert!(tree.root().fork().is_none());
    }
}
