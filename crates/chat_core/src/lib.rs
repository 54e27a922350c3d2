//! chat_core - Core types for the branching chat history
//!
//! This crate provides the foundational types used across all chat-related crates:
//! - `ids` - MessageId, the opaque time-ordered message identifier
//! - `message` - Message and Sender value records
//! - `config` - ChatConfig loaded from file and environment
//! - `paths` - Config directory helpers

pub mod config;
pub mod ids;
pub mod message;
pub mod paths;

// Re-export commonly used types
pub use config::ChatConfig;
pub use ids::MessageId;
pub use message::{Message, Sender};
