//! Identifier newtypes for books and `WebSocket` connections.
//!
//! Book identifiers are time-derived integers assigned by the registry at
//! creation time (the registry guarantees uniqueness by bumping past the
//! last issued value). Connection identifiers are random UUIDs minted when
//! a subscriber's socket is accepted; they are the handle the presence
//! roster uses to remove a subscriber on disconnect.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a book record.
///
/// Opaque to clients; on the wire and in the store file it is a plain
/// integer (millisecond timestamp, bumped when two creations land in the
/// same millisecond).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BookId(pub u64);

impl BookId {
    /// Return the inner integer value.
    pub const fn into_inner(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for BookId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for BookId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<BookId> for u64 {
    fn from(id: BookId) -> Self {
        id.0
    }
}

/// Unique identifier for one `WebSocket` connection.
///
/// Generated server-side when the socket is accepted. Distinct from the
/// subscriber identifier: the same subscriber id may appear on several
/// connections (two browser tabs), each with its own connection id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ConnectionId(pub Uuid);

impl ConnectionId {
    /// Mint a fresh random connection identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Return the inner [`Uuid`] value.
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ConnectionId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}
