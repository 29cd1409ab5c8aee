//! Flat-file persistence for the Bookwire library tracker.
//!
//! The store is a single JSON file holding the full book collection. It is
//! read once at startup and rewritten wholesale after every mutation --
//! there is no incremental mode, no locking, and no support for concurrent
//! external writers.
//!
//! Both directions fail soft: a missing or unparseable file loads as an
//! empty collection, and a failed write is logged and swallowed rather
//! than rolling back the in-memory mutation that triggered it.
//!
//! # Modules
//!
//! - [`file_store`] -- Whole-file JSON load/save
//! - [`write_queue`] -- Background task that serializes save requests
//! - [`error`] -- The persistence error type (internal, never surfaced)

pub mod error;
pub mod file_store;
pub mod write_queue;

pub use error::StoreError;
pub use file_store::FileStore;
pub use write_queue::WriteQueue;
