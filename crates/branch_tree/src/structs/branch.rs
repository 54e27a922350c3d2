use std::collections::BTreeMap;

use chat_core::{Message, MessageId};

use super::locator::BranchLocator;

/// Arena slot of a branch inside its `ChatTree`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchId(pub(crate) usize);

impl BranchId {
    pub const ROOT: BranchId = BranchId(0);
}

/// One timeline of messages.
///
/// A branch stores only the messages said after its fork point. The shared
/// prefix lives in its ancestors and is reached through `parent`.
#[derive(Clone, Debug)]
pub struct Branch {
    pub(crate) id: BranchId,
    pub(crate) parent: Option<BranchId>,
    pub(crate) locator: BranchLocator,
    pub(crate) messages: Vec<Message>,

    /// Alternative continuations hanging off the end of `messages`.
    pub(crate) fork: Option<Fork>,
}

impl Branch {
    pub(crate) fn root() -> Self {
        Self {
            id: BranchId::ROOT,
            parent: None,
            locator: BranchLocator::Root,
            messages: Vec::new(),
            fork: None,
        }
    }

    pub(crate) fn child(
        id: BranchId,
        parent: BranchId,
        locator: BranchLocator,
        messages: Vec<Message>,
    ) -> Self {
        Self {
            id,
            parent: Some(parent),
            locator,
            messages,
            fork: None,
        }
    }

    pub fn id(&self) -> BranchId {
        self.id
    }

    /// Owning branch, `None` for the root.
    pub fn parent(&self) -> Option<BranchId> {
        self.parent
    }

    pub fn locator(&self) -> BranchLocator {
        self.locator
    }

    /// Messages of this branch in chronological order, excluding the inherited prefix.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn fork(&self) -> Option<&Fork> {
        self.fork.as_ref()
    }

    /// The fork keyed by `origin`, if this branch owns it.
    pub fn branches_for(&self, origin: MessageId) -> Option<&Fork> {
        self.fork.as_ref().filter(|fork| fork.origin == origin)
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// A leaf has no fork after its messages, so new messages may be appended.
    pub fn is_leaf(&self) -> bool {
        self.fork.is_none()
    }

    pub fn position_of(&self, message_id: MessageId) -> Option<usize> {
        self.messages.iter().position(|m| m.id == message_id)
    }
}

/// The set of alternative continuations created by editing `origin`.
///
/// Child `1` holds the original continuation starting with `origin` itself;
/// children `2..` each start with an edited replacement.
#[derive(Clone, Debug)]
pub struct Fork {
    pub(crate) origin: MessageId,
    pub(crate) children: BTreeMap<u32, BranchId>,
    /// Next index to hand out; indices are never reused.
    pub(crate) next_index: u32,
    /// Last child selected through this fork.
    pub(crate) selected: u32,
}

impl Fork {
    pub(crate) fn new(origin: MessageId, original: BranchId, edited: BranchId) -> Self {
        Self {
            origin,
            children: BTreeMap::from([(1, original), (2, edited)]),
            next_index: 3,
            selected: 2,
        }
    }

    pub(crate) fn allocate_index(&mut self) -> u32 {
        let index = self.next_index;
        self.next_index += 1;
        index
    }

    /// Id of the message that was edited to create this fork.
    pub fn origin(&self) -> MessageId {
        self.origin
    }

    /// Available branch indices in ascending order.
    pub fn indices(&self) -> Vec<u32> {
        self.children.keys().copied().collect()
    }

    pub fn child(&self, index: u32) -> Option<BranchId> {
        self.children.get(&index).copied()
    }

    pub fn children(&self) -> impl Iterator<Item = (u32, BranchId)> + '_ {
        self.children.iter().map(|(index, id)| (*index, *id))
    }

    /// Child shown last time this fork was on the active chain.
    pub fn selected(&self) -> u32 {
        self.selected
    }

    /// Child to follow when descending without an explicit choice.
    pub(crate) fn preferred_child(&self) -> Option<(u32, BranchId)> {
        self.children
            .get(&self.selected)
            .map(|id| (self.selected, *id))
            .or_else(|| self.children.iter().next().map(|(i, id)| (*i, *id)))
    }
}
