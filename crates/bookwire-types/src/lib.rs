//! Shared type definitions for the Bookwire library tracker.
//!
//! This crate is the single source of truth for every type that crosses a
//! boundary in the Bookwire workspace: the REST request/response bodies, the
//! `WebSocket` event frames, and the records written to the JSON store file.
//! All structs serialize with `camelCase` field names so the wire format
//! and the store file share one shape.
//!
//! # Modules
//!
//! - [`ids`] -- Identifier newtypes for books and connections
//! - [`book`] -- The book record, the only persisted entity
//! - [`presence`] -- Subscriber roles and connection-scoped presence records
//! - [`stats`] -- Derived owner-dashboard statistics
//! - [`events`] -- Typed `WebSocket` events (server-to-client and client-to-server)

pub mod book;
pub mod events;
pub mod ids;
pub mod presence;
pub mod stats;

// Re-export all public types at crate root for convenience.
pub use book::Book;
pub use events::{ClientEvent, FavoriteUpdate, ServerEvent};
pub use ids::{BookId, ConnectionId};
pub use presence::{Presence, Role};
pub use stats::DashboardStats;
