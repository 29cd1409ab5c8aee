//! The book record, the only entity Bookwire persists.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::BookId;

/// A single tracked book.
///
/// The same shape is used for REST responses, `WebSocket` event payloads,
/// and entries in the JSON store file. `favorites` holds subscriber ids in
/// insertion order; the registry rejects duplicates, so membership count
/// equals favorite count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Registry-assigned unique identifier.
    pub id: BookId,
    /// Book title. Never empty once past validation.
    pub title: String,
    /// Book author. Never empty once past validation.
    pub author: String,
    /// When the book is due back, if it is currently lent out.
    #[serde(default)]
    pub return_date_time: Option<DateTime<Utc>>,
    /// Name of the reader who currently has the book, if any.
    #[serde(default)]
    pub reader_name: Option<String>,
    /// Subscriber ids that have favorited this book, insertion order.
    #[serde(default)]
    pub favorites: Vec<String>,
}

impl Book {
    /// Number of subscribers that have favorited this book.
    pub fn favorites_count(&self) -> usize {
        self.favorites.len()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn serializes_with_camel_case_fields() {
        let book = Book {
            id: BookId(1_700_000_000_000),
            title: String::from("Dune"),
            author: String::from("Herbert"),
            return_date_time: None,
            reader_name: Some(String::from("Paul")),
            favorites: vec![String::from("u1")],
        };

        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["id"], 1_700_000_000_000_u64);
        assert_eq!(json["returnDateTime"], serde_json::Value::Null);
        assert_eq!(json["readerName"], "Paul");
        assert_eq!(json["favorites"][0], "u1");
    }

    #[test]
    fn missing_optional_fields_default_on_load() {
        // Store files written by older versions may omit favorites entirely.
        let book: Book =
            serde_json::from_str(r#"{"id": 42, "title": "Dune", "author": "Herbert"}"#).unwrap();
        assert!(book.favorites.is_empty());
        assert!(book.return_date_time.is_none());
        assert!(book.reader_name.is_none());
    }
}
