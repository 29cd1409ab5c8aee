//! Whole-file JSON load/save for the book collection.

use std::path::{Path, PathBuf};

use bookwire_types::Book;
use tracing::{info, warn};

use crate::error::StoreError;

/// Handle to the JSON store file.
///
/// Cheap to clone; holds only the path. Single-process, single-writer
/// assumption throughout: the [`WriteQueue`](crate::write_queue::WriteQueue)
/// is the only component that should call [`save`](Self::save) once the
/// server is running.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store handle for the given file path.
    ///
    /// The file does not need to exist yet; it is created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path of the underlying store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full book collection from the store file.
    ///
    /// Fails soft: a missing file, an unreadable file, or unparseable
    /// contents all yield an empty collection. Nothing here is an error
    /// to the caller -- starting fresh is the designed fallback.
    pub async fn load(&self) -> Vec<Book> {
        match self.try_load().await {
            Ok(books) => {
                info!(path = %self.path.display(), count = books.len(), "loaded books from store");
                books
            }
            Err(e) => {
                info!(
                    path = %self.path.display(),
                    reason = %e,
                    "no usable store file, starting with empty collection"
                );
                Vec::new()
            }
        }
    }

    /// Overwrite the store file with the full collection.
    ///
    /// Fails soft: write errors are logged at warn level and swallowed.
    /// A failed save never rolls back the in-memory mutation.
    pub async fn save(&self, books: &[Book]) {
        match self.try_save(books).await {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), count = books.len(), "books saved to store");
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to save books to store");
            }
        }
    }

    async fn try_load(&self) -> Result<Vec<Book>, StoreError> {
        let data = tokio::fs::read_to_string(&self.path).await?;
        let books = serde_json::from_str(&data)?;
        Ok(books)
    }

    async fn try_save(&self, books: &[Book]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(books)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}
