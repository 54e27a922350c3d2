use std::fmt;

use chat_core::MessageId;
use serde::{Deserialize, Serialize};

/// Identifies a branch relative to its parent.
///
/// A path of locators starting with `Root` names a chain of branches from the
/// root down to some descendant.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BranchLocator {
    Root,
    /// Child `index` of the fork keyed by `origin`.
    Fork { origin: MessageId, index: u32 },
}

impl BranchLocator {
    pub fn fork(origin: MessageId, index: u32) -> Self {
        Self::Fork { origin, index }
    }

    pub fn is_root(&self) -> bool {
        matches!(self, Self::Root)
    }

    /// Branch index within its fork; `None` for the root.
    pub fn index(&self) -> Option<u32> {
        match self {
            Self::Root => None,
            Self::Fork { index, .. } => Some(*index),
        }
    }
}

impl fmt::Display for BranchLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str("root"),
            Self::Fork { origin, index } => write!(f, "{}#{}", origin.short(), index),
        }
    }
}
