//! Mutating operations on `ChatTree`.
//!
//! Every operation validates its inputs before touching the tree, so a
//! returned error always means nothing changed.

mod append;
mod fork;
mod navigate;

pub use fork::ForkResult;
