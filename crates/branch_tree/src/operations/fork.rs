use chat_core::{Message, MessageId};
use serde::Serialize;

use crate::error::{Result, TreeError};
use crate::structs::branch::{BranchId, Fork};
use crate::structs::locator::BranchLocator;
use crate::structs::tree::ChatTree;

/// Outcome of a successful edit.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ForkResult {
    /// Key of the fork the new branch belongs to
    pub origin: MessageId,
    /// Index of the new branch within that fork
    pub branch_index: u32,
    /// The replacement message heading the new branch
    pub message: Message,
}

impl ForkResult {
    pub fn locator(&self) -> BranchLocator {
        BranchLocator::fork(self.origin, self.branch_index)
    }
}

impl ChatTree {
    /// Replace `message_id` with `new_content` on a new branch, keeping the
    /// original continuation as branch `1` of the fork.
    ///
    /// The message must lie on the active chain. The first active branch that
    /// directly contains it is the one that forks. When the message heads a
    /// child branch (it is itself an original or an earlier replacement), the
    /// new branch is added as another sibling of that fork.
    pub fn edit_message(
        &mut self,
        message_id: MessageId,
        new_content: impl Into<String>,
    ) -> Result<ForkResult> {
        let Some((depth, index)) = self.locate_on_path(message_id) else {
            let err = if self.find_message(message_id).is_some() {
                TreeError::NotOnActivePath(message_id)
            } else {
                TreeError::MessageNotFound(message_id)
            };
            tracing::warn!(message_id = %message_id, error = %err, "ChatTree: Edit rejected");
            return Err(err);
        };

        let branch_id = self.active[depth];
        let edited = self.node(branch_id).messages[index].edited(new_content);

        tracing::info!(
            message_id = %message_id,
            branch = %self.node(branch_id).locator(),
            position = index,
            new_message_id = %edited.id,
            "ChatTree: Editing message"
        );

        let result = if index == 0 && depth > 0 {
            self.add_sibling(depth, edited)?
        } else {
            self.split_branch(depth, index, edited)
        };

        tracing::info!(
            origin = %result.origin,
            branch_index = result.branch_index,
            path_len = self.active.len(),
            "ChatTree: Forked new branch"
        );

        Ok(result)
    }

    /// Add `edited` as a new child of the fork that owns the branch at `depth`.
    fn add_sibling(&mut self, depth: usize, edited: Message) -> Result<ForkResult> {
        let parent = self.active[depth - 1];
        let Some(fork) = self.node_mut(parent).fork.as_mut() else {
            return Err(TreeError::InvalidPath(
                "parent of a child branch has no fork".to_string(),
            ));
        };
        let origin = fork.origin;
        let branch_index = fork.allocate_index();

        let child = self.alloc_branch(
            parent,
            BranchLocator::fork(origin, branch_index),
            vec![edited.clone()],
        );
        if let Some(fork) = self.node_mut(parent).fork.as_mut() {
            fork.children.insert(branch_index, child);
        }

        let mut chain = self.active[..depth].to_vec();
        chain.push(child);
        self.activate(chain);

        Ok(ForkResult {
            origin,
            branch_index,
            message: edited,
        })
    }

    /// Split the branch at `depth` before position `index`: the tail (and any
    /// fork hanging off it) moves to child `1`, `edited` starts child `2`.
    fn split_branch(&mut self, depth: usize, index: usize, edited: Message) -> ForkResult {
        let branch_id = self.active[depth];
        let origin = self.node(branch_id).messages[index].id;

        let branch = self.node_mut(branch_id);
        let tail = branch.messages.split_off(index);
        let moved_fork = branch.fork.take();

        let original = self.alloc_branch(branch_id, BranchLocator::fork(origin, 1), tail);
        if let Some(fork) = moved_fork {
            let grandchildren: Vec<BranchId> = fork.children().map(|(_, id)| id).collect();
            for child in grandchildren {
                self.node_mut(child).parent = Some(original);
            }
            self.node_mut(original).fork = Some(fork);
        }

        let replacement = self.alloc_branch(
            branch_id,
            BranchLocator::fork(origin, 2),
            vec![edited.clone()],
        );
        self.node_mut(branch_id).fork = Some(Fork::new(origin, original, replacement));

        let mut chain = self.active[..=depth].to_vec();
        chain.push(replacement);
        self.activate(chain);

        ForkResult {
            origin,
            branch_index: 2,
            message: edited,
        }
    }
}
