//! Subscriber roles and connection-scoped presence records.

use serde::{Deserialize, Serialize};

use crate::ids::ConnectionId;

/// Role a subscriber declares when connecting.
///
/// The role is informational: it is echoed in presence broadcasts so the
/// frontend can render reader and owner views differently. It grants no
/// authority (there is no authentication in this demo).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A reader browsing the catalogue.
    #[default]
    Reader,
    /// A library owner, eligible to open the owner dashboard.
    Owner,
}

impl Role {
    /// Parse a role from a connection query parameter.
    ///
    /// Anything other than the literal `owner` falls back to
    /// [`Role::Reader`], the validated default.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("owner") => Self::Owner,
            _ => Self::Reader,
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Reader => write!(f, "reader"),
            Self::Owner => write!(f, "owner"),
        }
    }
}

/// One connected subscriber, as broadcast in `userStatus` events.
///
/// Created when a `WebSocket` connection is accepted and destroyed on
/// disconnect. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presence {
    /// Subscriber identifier (client-supplied or generated fallback).
    pub id: String,
    /// Declared role.
    pub role: Role,
    /// Handle for this specific connection.
    pub connection_id: ConnectionId,
}
