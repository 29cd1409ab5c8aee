//! Error types for registry operations.

use bookwire_types::BookId;

/// Errors a registry mutation can produce.
///
/// These are the only two client-visible failure modes: bad input and a
/// reference to a book that does not exist. Everything else in the system
/// is either logged-and-swallowed (persistence) or a generic server error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Required input was missing or empty. Client-correctable.
    #[error("{0}")]
    Validation(String),

    /// The referenced book id does not exist in the registry.
    #[error("Book not found")]
    NotFound(BookId),
}
