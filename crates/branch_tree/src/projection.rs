//! ActiveViewProjector - flatten the active chain for linear rendering
//!
//! The projection is a pure function of the tree: calling it twice without an
//! intervening mutation yields equal output.

use chat_core::{Message, MessageId};
use serde::{Deserialize, Serialize};

use crate::structs::branch::{BranchId, Fork};
use crate::structs::locator::BranchLocator;
use crate::structs::tree::ChatTree;

/// Available alternatives at a fork and which one is shown.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SiblingBranches {
    /// Key of the fork
    pub origin: MessageId,
    /// Branch indices in ascending order
    pub indices: Vec<u32>,
    /// Index of the branch currently shown
    pub selected: u32,
}

impl SiblingBranches {
    pub(crate) fn new(fork: &Fork, selected: u32) -> Self {
        Self {
            origin: fork.origin(),
            indices: fork.indices(),
            selected,
        }
    }

    /// 1-based position of the selected branch, e.g. `(2, 3)` for "2 / 3".
    pub fn position(&self) -> (usize, usize) {
        let pos = self
            .indices
            .iter()
            .position(|i| *i == self.selected)
            .map_or(0, |p| p + 1);
        (pos, self.indices.len())
    }

    pub fn previous(&self) -> Option<u32> {
        self.indices
            .iter()
            .rev()
            .find(|i| **i < self.selected)
            .copied()
    }

    pub fn next(&self) -> Option<u32> {
        self.indices.iter().find(|i| **i > self.selected).copied()
    }
}

/// One render-ready row.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ProjectionEntry {
    pub message: Message,
    /// Number of forks traversed to reach this message
    pub depth: usize,
    /// Branch holding the message
    pub branch: BranchLocator,
    /// False for messages of non-selected sibling branches
    pub is_active: bool,
    /// Set on the first active message after a fork
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub siblings: Option<SiblingBranches>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProjectionOptions {
    /// Also emit the messages of non-selected siblings at each fork on the path
    pub include_inactive: bool,
}

pub struct ActiveViewProjector;

impl ActiveViewProjector {
    /// Active messages only.
    pub fn project(tree: &ChatTree) -> Vec<ProjectionEntry> {
        Self::project_with(tree, ProjectionOptions::default())
    }

    pub fn project_with(tree: &ChatTree, options: ProjectionOptions) -> Vec<ProjectionEntry> {
        let chain = tree.active_branches();
        let mut entries = Vec::new();

        for (depth, id) in chain.iter().enumerate() {
            let branch = tree.node(*id);
            let mut siblings = None;

            if depth > 0 {
                let parent = tree.node(chain[depth - 1]);
                if let (Some(fork), Some(selected)) = (parent.fork(), branch.locator().index()) {
                    if options.include_inactive {
                        Self::emit_inactive(tree, fork, *id, depth, &mut entries);
                    }
                    siblings = Some(SiblingBranches::new(fork, selected));
                }
            }

            for message in branch.messages() {
                entries.push(ProjectionEntry {
                    message: message.clone(),
                    depth,
                    branch: branch.locator(),
                    is_active: true,
                    siblings: siblings.take(),
                });
            }
        }

        tracing::debug!(
            entries = entries.len(),
            path_len = chain.len(),
            include_inactive = options.include_inactive,
            "ActiveViewProjector: Projected view"
        );
        entries
    }

    fn emit_inactive(
        tree: &ChatTree,
        fork: &Fork,
        active_child: BranchId,
        depth: usize,
        entries: &mut Vec<ProjectionEntry>,
    ) {
        for (_, child) in fork.children().filter(|(_, c)| *c != active_child) {
            let sibling = tree.node(child);
            entries.extend(sibling.messages().iter().map(|message| ProjectionEntry {
                message: message.clone(),
                depth,
                branch: sibling.locator(),
                is_active: false,
                siblings: None,
            }));
        }
    }
}

impl ChatTree {
    /// Shorthand for `ActiveViewProjector::project`.
    pub fn project(&self) -> Vec<ProjectionEntry> {
        ActiveViewProjector::project(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chat_core::Sender;

    #[test]
    fn test_sibling_navigation() {
        let siblings = SiblingBranches {
            origin: MessageId::new(),
            indices: vec![1, 2, 4],
            selected: 2,
        };
        assert_eq!(siblings.position(), (2, 3));
        assert_eq!(siblings.previous(), Some(1));
        assert_eq!(siblings.next(), Some(4));

        let last = SiblingBranches {
            selected: 4,
            ..siblings.clone()
        };
        assert_eq!(last.next(), None);
        assert_eq!(last.position(), (3, 3));
    }

    #[test]
    fn test_project_marks_fork_head() {
        let mut tree = ChatTree::new();
        let a = tree.add_message("hi", Sender::Assistant);
        let b = tree.add_message("how are you", Sender::User);
        let edit = tree.edit_message(b.id, "how's work").unwrap();

        let view = tree.project();

        assert_eq!(view.len(), 2);
        assert_eq!(view[0].message, a);
        assert_eq!(view[0].depth, 0);
        assert!(view[0].siblings.is_none());

        assert_eq!(view[1].message, edit.message);
        assert_eq!(view[1].depth, 1);
        assert_eq!(view[1].branch, BranchLocator::fork(b.id, 2));
        let siblings = view[1].siblings.as_ref().unwrap();
        assert_eq!(siblings.indices, vec![1, 2]);
        assert_eq!(siblings.selected, 2);
    }

    #[test]
    fn test_project_with_inactive_siblings() {
        let mut tree = ChatTree::new();
        tree.add_message("hi", Sender::Assistant);
        let b = tree.add_message("how are you", Sender::User);
        tree.add_message("great", Sender::Assistant);
        tree.edit_message(b.id, "how's work").unwrap();

        let view = ActiveViewProjector::project_with(
            &tree,
            ProjectionOptions {
                include_inactive: true,
            },
        );

        let rows: Vec<_> = view
            .iter()
            .map(|e| (e.message.content.as_str(), e.is_active))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("hi", true),
                ("how are you", false),
                ("great", false),
                ("how's work", true),
            ]
        );
        assert!(view[3].siblings.is_some());
        assert!(view[1].siblings.is_none());
    }
}
