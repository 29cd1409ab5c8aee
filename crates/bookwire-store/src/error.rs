//! Error types for the persistence layer.
//!
//! [`StoreError`] exists for logging context only: the public store API
//! never returns it. Read failures yield an empty collection and write
//! failures are logged at warn level and swallowed.

/// Errors that can occur while reading or writing the store file.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A filesystem read or write failed.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file contents could not be parsed or the collection could not
    /// be serialized.
    #[error("store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
