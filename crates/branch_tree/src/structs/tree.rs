use chat_core::{Message, MessageId};

use crate::error::{Result, TreeError};
use crate::structs::branch::{Branch, BranchId};
use crate::structs::locator::BranchLocator;

/// Owns every branch of one conversation and the selection of the active chain.
///
/// Branches live in a flat arena and refer to each other by `BranchId`. The
/// active chain always starts at the root and ends at a leaf branch (one with
/// no fork), which is where new messages are appended.
#[derive(Clone, Debug)]
pub struct ChatTree {
    pub(crate) branches: Vec<Branch>,
    pub(crate) active: Vec<BranchId>,
}

impl Default for ChatTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatTree {
    pub fn new() -> Self {
        Self {
            branches: vec![Branch::root()],
            active: vec![BranchId::ROOT],
        }
    }

    pub fn root(&self) -> &Branch {
        self.node(BranchId::ROOT)
    }

    pub fn branch(&self, id: BranchId) -> Option<&Branch> {
        self.branches.get(id.0)
    }

    pub(crate) fn node(&self, id: BranchId) -> &Branch {
        &self.branches[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: BranchId) -> &mut Branch {
        &mut self.branches[id.0]
    }

    pub fn branch_count(&self) -> usize {
        self.branches.len()
    }

    /// All branches in creation order.
    pub fn branches(&self) -> impl Iterator<Item = &Branch> {
        self.branches.iter()
    }

    /// Locators of the active chain, root first.
    pub fn current_path(&self) -> Vec<BranchLocator> {
        self.active.iter().map(|id| self.node(*id).locator).collect()
    }

    /// Branch ids of the active chain, root first.
    pub fn active_branches(&self) -> &[BranchId] {
        &self.active
    }

    /// The branch new messages are appended to.
    pub fn leaf(&self) -> &Branch {
        let leaf = self.active.last().copied().unwrap_or(BranchId::ROOT);
        self.node(leaf)
    }

    /// The linear transcript along the active chain.
    pub fn active_messages(&self) -> Vec<&Message> {
        self.active
            .iter()
            .flat_map(|id| self.node(*id).messages.iter())
            .collect()
    }

    /// Whether `message_id` is shown by the current projection.
    pub fn is_on_active_path(&self, message_id: MessageId) -> bool {
        self.locate_on_path(message_id).is_some()
    }

    /// Total number of messages stored across all branches.
    pub fn message_count(&self) -> usize {
        self.branches.iter().map(|b| b.messages.len()).sum()
    }

    /// Find the branch holding `message_id` and its position there.
    pub fn find_message(&self, message_id: MessageId) -> Option<(BranchId, usize)> {
        self.branches
            .iter()
            .find_map(|b| b.position_of(message_id).map(|pos| (b.id, pos)))
    }

    /// Position in the active chain and index within that branch of the first
    /// active branch that directly contains `message_id`.
    pub(crate) fn locate_on_path(&self, message_id: MessageId) -> Option<(usize, usize)> {
        self.active.iter().enumerate().find_map(|(depth, id)| {
            self.node(*id)
                .position_of(message_id)
                .map(|index| (depth, index))
        })
    }

    /// Chain of branch ids from the root down to `branch`, following parent links.
    pub(crate) fn chain_to(&self, branch: BranchId) -> Vec<BranchId> {
        let mut chain = vec![branch];
        let mut current = self.node(branch).parent;
        while let Some(parent) = current {
            chain.push(parent);
            current = self.node(parent).parent;
        }
        chain.reverse();
        chain
    }

    /// Turn a locator path into branch ids, checking every step.
    pub(crate) fn resolve_locators(&self, path: &[BranchLocator]) -> Result<Vec<BranchId>> {
        let Some((first, rest)) = path.split_first() else {
            return Err(TreeError::InvalidPath("path is empty".to_string()));
        };
        if !first.is_root() {
            return Err(TreeError::InvalidPath(format!(
                "path must start at root, found {first}"
            )));
        }

        let mut chain = Vec::with_capacity(path.len());
        chain.push(BranchId::ROOT);
        let mut current = BranchId::ROOT;
        for locator in rest {
            let BranchLocator::Fork { origin, index } = *locator else {
                return Err(TreeError::InvalidPath(
                    "root may only appear first".to_string(),
                ));
            };
            let child = self
                .node(current)
                .branches_for(origin)
                .and_then(|fork| fork.child(index))
                .ok_or(TreeError::BranchNotFound { origin, index })?;
            chain.push(child);
            current = child;
        }
        Ok(chain)
    }

    /// Follow each fork's remembered selection until a leaf is reached.
    pub(crate) fn extend_to_leaf(&self, chain: &mut Vec<BranchId>) {
        while let Some(fork) = chain.last().copied().and_then(|id| self.node(id).fork.as_ref()) {
            match fork.preferred_child() {
                Some((_, child)) => chain.push(child),
                None => break,
            }
        }
    }

    /// Make `chain` the active chain and remember each selection along it.
    pub(crate) fn activate(&mut self, chain: Vec<BranchId>) {
        for pair in chain.windows(2) {
            let index = self.node(pair[1]).locator.index();
            if let (Some(fork), Some(index)) = (self.node_mut(pair[0]).fork.as_mut(), index) {
                fork.selected = index;
            }
        }
        self.active = chain;
    }

    pub(crate) fn alloc_branch(
        &mut self,
        parent: BranchId,
        locator: BranchLocator,
        messages: Vec<Message>,
    ) -> BranchId {
        let id = BranchId(self.branches.len());
        self.branches
            .push(Branch::child(id, parent, locator, messages));
        id
    }
}
