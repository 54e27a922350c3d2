//! Typed message identifier.
//!
//! `MessageId` wraps a UUIDv7: a millisecond timestamp followed by random
//! bits, so ids sort by creation time and never collide. The `short()` form
//! (last 8 hex chars, taken from the random part so that messages created in
//! the same minute still look different) is for human-facing display. Lookups
//! by a typed fragment go through `matches_short`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A message identifier (UUIDv7).
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(uuid::Uuid);

impl MessageId {
    /// Create a new time-ordered ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }

    /// Last 8 hex characters, for display only.
    pub fn short(&self) -> String {
        let hex = self.to_hex();
        hex[hex.len() - 8..].to_string()
    }

    /// Full 32-character hex string (no hyphens).
    pub fn to_hex(&self) -> String {
        self.0.as_simple().to_string()
    }

    /// Parse from a hex string (32 chars, no hyphens) or standard UUID format.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        uuid::Uuid::parse_str(s).map(Self)
    }

    /// Check if a query string matches this ID as a hex prefix or as a hex
    /// suffix (which is what `short()` displays).
    ///
    /// Hyphens in the query are ignored so that a copied UUID fragment works too.
    pub fn matches_short(&self, query: &str) -> bool {
        let query: String = query
            .chars()
            .filter(|c| *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        if query.is_empty() {
            return false;
        }
        let hex = self.to_hex();
        hex.starts_with(&query) || hex.ends_with(&query)
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<uuid::Uuid> for MessageId {
    fn from(u: uuid::Uuid) -> Self {
        Self(u)
    }
}

impl From<MessageId> for uuid::Uuid {
    fn from(id: MessageId) -> uuid::Uuid {
        id.0
    }
}

impl FromStr for MessageId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Full UUID with hyphens for log readability
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MessageId({})", self.short())
    }
}
