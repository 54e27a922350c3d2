use chat_core::MessageId;

use crate::error::{Result, TreeError};
use crate::projection::SiblingBranches;
use crate::resolver::PathResolver;
use crate::structs::locator::BranchLocator;
use crate::structs::tree::ChatTree;

impl ChatTree {
    /// Select child `branch_index` of the fork keyed by `message_id` on the active chain.
    ///
    /// A fork that exists only below an unselected branch is rejected with
    /// `NotOnActivePath`.
    ///
    /// Everything below the fork is re-selected from the chosen child, following
    /// each deeper fork's last selection until a leaf is reached.
    pub fn switch_branch(&mut self, message_id: MessageId, branch_index: u32) -> Result<()> {
        let Some(depth) = self
            .active
            .iter()
            .position(|id| self.node(*id).branches_for(message_id).is_some())
        else {
            let forked_elsewhere = self
                .branches
                .iter()
                .any(|b| b.branches_for(message_id).is_some());
            let err = if forked_elsewhere {
                TreeError::NotOnActivePath(message_id)
            } else if self.find_message(message_id).is_some() {
                TreeError::BranchNotFound {
                    origin: message_id,
                    index: branch_index,
                }
            } else {
                TreeError::MessageNotFound(message_id)
            };
            tracing::warn!(message_id = %message_id, branch_index, error = %err, "ChatTree: Switch rejected");
            return Err(err);
        };

        let child = self
            .node(self.active[depth])
            .branches_for(message_id)
            .and_then(|fork| fork.child(branch_index))
            .ok_or(TreeError::BranchNotFound {
                origin: message_id,
                index: branch_index,
            })
            .inspect_err(|err| {
                tracing::warn!(message_id = %message_id, branch_index, error = %err, "ChatTree: Switch rejected");
            })?;

        let mut chain = self.active[..=depth].to_vec();
        chain.push(child);
        self.extend_to_leaf(&mut chain);

        tracing::info!(
            origin = %message_id,
            branch_index,
            path_len = chain.len(),
            "ChatTree: Switched branch"
        );
        self.activate(chain);
        Ok(())
    }

    /// Make the chain reaching `message_id` active and return the new path.
    pub fn jump_to(&mut self, message_id: MessageId) -> Result<Vec<BranchLocator>> {
        let mut chain = PathResolver::resolve_chain(self, message_id)
            .ok_or(TreeError::MessageNotFound(message_id))?;
        self.extend_to_leaf(&mut chain);

        tracing::info!(message_id = %message_id, path_len = chain.len(), "ChatTree: Jumped to message");
        self.activate(chain);
        Ok(self.current_path())
    }

    /// Replace the active chain with `path`.
    ///
    /// The path must start at the root and name existing branches. A path
    /// ending above a fork is extended to a leaf.
    pub fn set_current_path(&mut self, path: &[BranchLocator]) -> Result<()> {
        let mut chain = self.resolve_locators(path).inspect_err(|err| {
            tracing::warn!(error = %err, "ChatTree: Path rejected");
        })?;
        self.extend_to_leaf(&mut chain);

        tracing::debug!(path_len = chain.len(), "ChatTree: Path set");
        self.activate(chain);
        Ok(())
    }

    /// Sibling information for the fork a message belongs to on the active chain.
    ///
    /// `message_id` may be the fork's origin or the first message of any of its
    /// children.
    pub fn siblings_of(&self, message_id: MessageId) -> Option<SiblingBranches> {
        self.active.windows(2).find_map(|pair| {
            let fork = self.node(pair[0]).fork.as_ref()?;
            let heads_child = fork.children().any(|(_, child)| {
                self.node(child)
                    .messages
                    .first()
                    .is_some_and(|m| m.id == message_id)
            });
            if fork.origin != message_id && !heads_child {
                return None;
            }
            let selected = self.node(pair[1]).locator.index()?;
            Some(SiblingBranches::new(fork, selected))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chat_core::Sender;

    fn contents(tree: &ChatTree) -> Vec<String> {
        tree.active_messages()
            .iter()
            .map(|m| m.content.clone())
            .collect()
    }

    #[test]
    fn test_switch_restores_original_continuation() {
        let mut tree = ChatTree::new();
        tree.add_message("hi", Sender::Assistant);
        let b = tree.add_message("how are you", Sender::User);
        tree.add_message("good", Sender::Assistant);

        tree.edit_message(b.id, "how's work").unwrap();
        assert_eq!(contents(&tree), vec!["hi", "how's work"]);

        tree.switch_branch(b.id, 1).unwrap();
        assert_eq!(contents(&tree), vec!["hi", "how are you", "good"]);
    }

    #[test]
    fn test_switch_to_missing_index_fails_without_mutation() {
        let mut tree = ChatTree::new();
        let a = tree.add_message("a", Sender::User);
        tree.edit_message(a.id, "a2").unwrap();
        let before = tree.current_path();

        let err = tree.switch_branch(a.id, 9).unwrap_err();

        assert_eq!(err, TreeError::BranchNotFound { origin: a.id, index: 9 });
        assert_eq!(tree.current_path(), before);
    }

    #[test]
    fn test_switch_on_message_without_fork() {
        let mut tree = ChatTree::new();
        let a = tree.add_message("a", Sender::User);

        assert!(matches!(
            tree.switch_branch(a.id, 1),
            Err(TreeError::BranchNotFound { .. })
        ));
        assert!(matches!(
            tree.switch_branch(MessageId::new(), 1),
            Err(TreeError::MessageNotFound(_))
        ));
    }

    #[test]
    fn test_switch_remembers_deeper_selection() {
        let mut tree = ChatTree::new();
        let a = tree.add_message("a", Sender::User);
        let b = tree.add_message("b", Sender::Assistant);

        tree.edit_message(a.id, "a2").unwrap();
        tree.switch_branch(a.id, 1).unwrap();
        // Fork inside branch 1 and pick the replacement there.
        tree.edit_message(b.id, "b2").unwrap();

        tree.switch_branch(a.id, 2).unwrap();
        assert_eq!(contents(&tree), vec!["a2"]);

        tree.switch_branch(a.id, 1).unwrap();
        assert_eq!(contents(&tree), vec!["a", "b2"]);
    }

    #[test]
    fn test_set_current_path_validates() {
        let mut tree = ChatTree::new();
        let a = tree.add_message("a", Sender::User);
        tree.edit_message(a.id, "a2").unwrap();
        let before = tree.current_path();

        assert!(matches!(
            tree.set_current_path(&[]),
            Err(TreeError::InvalidPath(_))
        ));
        assert!(matches!(
            tree.set_current_path(&[BranchLocator::fork(a.id, 1)]),
            Err(TreeError::InvalidPath(_))
        ));
        assert!(matches!(
            tree.set_current_path(&[BranchLocator::Root, BranchLocator::fork(a.id, 5)]),
            Err(TreeError::BranchNotFound { .. })
        ));
        assert_eq!(tree.current_path(), before);

        tree.set_current_path(&[BranchLocator::Root, BranchLocator::fork(a.id, 1)])
            .unwrap();
        assert_eq!(contents(&tree), vec!["a"]);
    }

    #[test]
    fn test_set_current_path_extends_to_leaf() {
        let mut tree = ChatTree::new();
        let a = tree.add_message("a", Sender::User);
        tree.edit_message(a.id, "a2").unwrap();

        tree.set_current_path(&[BranchLocator::Root]).unwrap();

        assert_eq!(tree.current_path().len(), 2);
        assert!(tree.leaf().is_leaf());
    }

    #[test]
    fn test_siblings_of_origin_and_heads() {
        let mut tree = ChatTree::new();
        let a = tree.add_message("a", Sender::User);
        let edit = tree.edit_message(a.id, "a2").unwrap();

        let by_origin = tree.siblings_of(a.id).unwrap();
        let by_head = tree.siblings_of(edit.message.id).unwrap();
        assert_eq!(by_origin, by_head);
        assert_eq!(by_origin.indices, vec![1, 2]);
        assert_eq!(by_origin.selected, 2);

        let plain = tree.add_message("reply", Sender::Assistant);
        assert!(tree.siblings_of(plain.id).is_none());
    }
}
