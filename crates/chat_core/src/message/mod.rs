//! Message module - Message value records
//!
//! Shared message types used across the system.

mod record;
mod sender;

pub use record::Message;
pub use sender::Sender;
