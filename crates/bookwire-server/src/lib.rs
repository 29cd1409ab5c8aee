//! Bookwire HTTP + `WebSocket` server.
//!
//! This crate wires the registry, store, and broadcast channel into an
//! Axum application:
//!
//! - **REST endpoints** for the five book operations (list, create,
//!   update, delete, favorite-toggle)
//! - **`WebSocket` endpoint** (`/ws`) over which every mutation event,
//!   presence change, and dashboard-statistics refresh is broadcast to
//!   all connected subscribers via [`tokio::sync::broadcast`]
//!
//! # Architecture
//!
//! Every mutation follows the same sequence: validate, apply to the
//! in-memory [`BookRegistry`](bookwire_core::BookRegistry) under its write
//! lock, enqueue a full snapshot on the serialized
//! [`WriteQueue`](bookwire_store::WriteQueue), broadcast the specific
//! event, then recompute and broadcast dashboard statistics. Reads bypass
//! persistence entirely and serve the in-memory collection.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use config::{AppConfig, ConfigError};
pub use router::build_router;
pub use server::{ServerError, start_server};
pub use state::{AppState, PresenceRoster};
