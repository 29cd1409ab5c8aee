//! The in-memory book registry.
//!
//! The registry is the sole source of truth while the process runs. It
//! holds an ordered collection of [`Book`] records and applies the four
//! mutations (create, update, remove, toggle-favorite) synchronously.
//! Persistence is the caller's concern: after every successful mutation
//! the server takes a [`snapshot`](BookRegistry::snapshot) and hands it to
//! the write queue.
//!
//! # Update semantics
//!
//! Updates are partial overwrites, not merges: `title` and `author` fall
//! back to the prior value when absent or empty, while `returnDateTime`
//! and `readerName` are always replaced with the supplied value (absent
//! clears). Favorites are never touched by an update.

use bookwire_types::{Book, BookId};
use chrono::{DateTime, Utc};

use crate::error::RegistryError;

/// Input for creating a new book.
#[derive(Debug, Clone, Default)]
pub struct NewBook {
    /// Required title (validated non-empty).
    pub title: String,
    /// Required author (validated non-empty).
    pub author: String,
    /// Optional return-due timestamp.
    pub return_date_time: Option<DateTime<Utc>>,
    /// Optional name of the current reader.
    pub reader_name: Option<String>,
}

/// Partial-overwrite input for updating an existing book.
#[derive(Debug, Clone, Default)]
pub struct BookPatch {
    /// New title; absent or empty keeps the prior title.
    pub title: Option<String>,
    /// New author; absent or empty keeps the prior author.
    pub author: Option<String>,
    /// New return-due timestamp; absent clears.
    pub return_date_time: Option<DateTime<Utc>>,
    /// New reader name; absent or empty clears.
    pub reader_name: Option<String>,
}

/// Ordered in-memory collection of book records.
///
/// Insertion order is observable: `list` returns books in creation order
/// and the dashboard tie-break favors the earliest-created book.
#[derive(Debug, Clone, Default)]
pub struct BookRegistry {
    books: Vec<Book>,
    last_id: u64,
}

impl BookRegistry {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            books: Vec::new(),
            last_id: 0,
        }
    }

    /// Build a registry from previously persisted books.
    ///
    /// Seeds the id watermark from the highest persisted id so that fresh
    /// ids never collide with loaded ones, even if the clock moved
    /// backwards since the file was written.
    pub fn from_books(books: Vec<Book>) -> Self {
        let last_id = books.iter().map(|b| b.id.into_inner()).max().unwrap_or(0);
        Self { books, last_id }
    }

    /// Borrow the current collection in insertion order.
    pub fn list(&self) -> &[Book] {
        &self.books
    }

    /// Clone the current collection, for handing to the write queue.
    pub fn snapshot(&self) -> Vec<Book> {
        self.books.clone()
    }

    /// Number of books currently registered.
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Whether the registry holds no books.
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Create a new book and append it to the collection.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Validation`] if title or author is empty;
    /// nothing is added in that case.
    pub fn create(&mut self, input: NewBook) -> Result<Book, RegistryError> {
        if input.title.is_empty() || input.author.is_empty() {
            return Err(RegistryError::Validation(String::from(
                "Title and author are required",
            )));
        }

        let book = Book {
            id: self.next_id(),
            title: input.title,
            author: input.author,
            return_date_time: input.return_date_time,
            reader_name: input.reader_name.filter(|n| !n.is_empty()),
            favorites: Vec::new(),
        };

        tracing::debug!(id = %book.id, title = book.title, "book created");
        self.books.push(book.clone());
        Ok(book)
    }

    /// Apply a partial overwrite to an existing book.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if `id` is unknown.
    pub fn update(&mut self, id: BookId, patch: BookPatch) -> Result<Book, RegistryError> {
        let book = self
            .books
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(RegistryError::NotFound(id))?;

        if let Some(title) = patch.title.filter(|t| !t.is_empty()) {
            book.title = title;
        }
        if let Some(author) = patch.author.filter(|a| !a.is_empty()) {
            book.author = author;
        }
        book.return_date_time = patch.return_date_time;
        book.reader_name = patch.reader_name.filter(|n| !n.is_empty());

        tracing::debug!(id = %book.id, "book updated");
        Ok(book.clone())
    }

    /// Remove a book, returning the removed record.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if `id` is unknown.
    pub fn remove(&mut self, id: BookId) -> Result<Book, RegistryError> {
        let pos = self
            .books
            .iter()
            .position(|b| b.id == id)
            .ok_or(RegistryError::NotFound(id))?;

        let book = self.books.remove(pos);
        tracing::debug!(id = %book.id, title = book.title, "book removed");
        Ok(book)
    }

    /// Flip `user_id`'s membership in a book's favorites set.
    ///
    /// Present removes, absent appends; toggling twice restores the
    /// original count. Returns the new favorite count.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if `id` is unknown.
    pub fn toggle_favorite(&mut self, id: BookId, user_id: &str) -> Result<usize, RegistryError> {
        let book = self
            .books
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(RegistryError::NotFound(id))?;

        if let Some(pos) = book.favorites.iter().position(|f| f == user_id) {
            book.favorites.remove(pos);
        } else {
            book.favorites.push(user_id.to_owned());
        }

        tracing::debug!(id = %book.id, user_id, count = book.favorites.len(), "favorite toggled");
        Ok(book.favorites.len())
    }

    /// Assign a fresh unique id.
    ///
    /// Time-derived (millisecond timestamp) but bumped past the last
    /// issued id, so two creations in the same millisecond still get
    /// distinct, strictly increasing values.
    fn next_id(&mut self) -> BookId {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let id = now.max(self.last_id.saturating_add(1));
        self.last_id = id;
        BookId(id)
    }
}
