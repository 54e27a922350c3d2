//! `branch_tree` manages a chat transcript in which any past message can be
//! edited without losing the original continuation.
//!
//! Editing forks a new branch at the edited message; the untouched
//! continuation stays reachable as branch `1` of that fork. A `ChatTree` tracks
//! which branch of every fork is currently selected, `PathResolver` finds the
//! branch chain that reaches an arbitrary message, and `ActiveViewProjector`
//! flattens the selected chain into a render-ready list.

pub mod error;
pub mod operations;
pub mod projection;
pub mod resolver;
pub mod structs;

// Re-export the public API
pub use chat_core::{Message, MessageId, Sender};
pub use error::{ErrorKind, Result, TreeError};
pub use operations::ForkResult;
pub use projection::{ActiveViewProjector, ProjectionEntry, ProjectionOptions, SiblingBranches};
pub use resolver::PathResolver;
pub use structs::branch::{Branch, BranchId, Fork};
pub use structs::locator::BranchLocator;
pub use structs::tree::ChatTree;
