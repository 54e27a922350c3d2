//! # Chat Session
//!
//! Owns one branching chat tree per conversation and drives it from UI
//! events. Assistant replies come from a pluggable `ResponseSource`.

pub mod error;
pub mod events;
pub mod manager;
pub mod responder;

// Re-exports
pub use error::SessionError;
pub use events::{Direction, SessionEvent, SessionOutcome};
pub use manager::ChatSession;
pub use responder::{EchoResponder, ResponseSource};
