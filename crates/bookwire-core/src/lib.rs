//! Core domain logic for the Bookwire library tracker.
//!
//! This crate owns the in-memory book collection and everything derived
//! from it. It is deliberately free of I/O: persistence and broadcasting
//! live in sibling crates, and the server wires them together around the
//! registry.
//!
//! # Modules
//!
//! - [`registry`] -- The ordered in-memory book collection and its mutations
//! - [`dashboard`] -- Pure aggregation of dashboard statistics
//! - [`error`] -- The registry error taxonomy (validation / not-found)

pub mod dashboard;
pub mod error;
pub mod registry;

pub use dashboard::compute_stats;
pub use error::RegistryError;
pub use registry::{BookPatch, BookRegistry, NewBook};
