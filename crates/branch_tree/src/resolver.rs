//! PathResolver - find the branch chain that reaches a message
//!
//! Callers that only know a message id (a deep link, a search hit, a message
//! typed by short id) use this to compute the locator path to the branch
//! holding it.

use chat_core::MessageId;

use crate::error::{Result, TreeError};
use crate::structs::branch::BranchId;
use crate::structs::locator::BranchLocator;
use crate::structs::tree::ChatTree;

pub struct PathResolver;

impl PathResolver {
    /// Locator path from the root to the branch that contains `target`.
    ///
    /// The search is depth-first from the root, visiting fork children in
    /// ascending index order, and stops at the first branch whose own messages
    /// include the target. Returns `None` if the id is not in the tree.
    pub fn resolve(tree: &ChatTree, target: MessageId) -> Option<Vec<BranchLocator>> {
        let chain = Self::resolve_chain(tree, target)?;
        Some(chain.iter().map(|id| tree.node(*id).locator()).collect())
    }

    pub(crate) fn resolve_chain(tree: &ChatTree, target: MessageId) -> Option<Vec<BranchId>> {
        // Forks always hang off the end of a branch, so a branch's own messages
        // are checked before any of its children are visited.
        let mut stack = vec![BranchId::ROOT];
        let mut visited = 0usize;
        while let Some(id) = stack.pop() {
            visited += 1;
            let branch = tree.node(id);
            if branch.position_of(target).is_some() {
                tracing::debug!(
                    message_id = %target,
                    branch = %branch.locator(),
                    visited,
                    "PathResolver: Resolved message"
                );
                return Some(tree.chain_to(id));
            }
            if let Some(fork) = branch.fork() {
                let children: Vec<BranchId> = fork.children().map(|(_, child)| child).collect();
                stack.extend(children.into_iter().rev());
            }
        }

        tracing::debug!(message_id = %target, visited, "PathResolver: Message not in tree");
        None
    }

    /// Locator path selecting child `indices[n]` at the n-th fork below the root.
    ///
    /// Returns `None` as soon as a branch has no fork or lacks the requested index.
    pub fn resolve_indices(tree: &ChatTree, indices: &[u32]) -> Option<Vec<BranchLocator>> {
        let mut path = vec![BranchLocator::Root];
        let mut current = tree.root();
        for &index in indices {
            let fork = current.fork()?;
            let child = tree.branch(fork.child(index)?)?;
            path.push(child.locator());
            current = child;
        }
        Some(path)
    }

    /// Find the single message whose id matches `query`: a full id, or a hex
    /// prefix or suffix such as the `short()` form.
    pub fn resolve_short(tree: &ChatTree, query: &str) -> Result<MessageId> {
        if let Ok(id) = MessageId::parse(query) {
            if tree.find_message(id).is_some() {
                return Ok(id);
            }
        }

        let matches: Vec<MessageId> = tree
            .branches()
            .flat_map(|b| b.messages().iter())
            .map(|m| m.id)
            .filter(|id| id.matches_short(query))
            .collect();

        match matches.as_slice() {
            [] => Err(TreeError::NoMatch(query.to_string())),
            [id] => Ok(*id),
            _ => Err(TreeError::Ambiguous {
                query: query.to_string(),
                candidates: matches.iter().map(|id| id.short()).collect(),
            }),
        }
    }
}
