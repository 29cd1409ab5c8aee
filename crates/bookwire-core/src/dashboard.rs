//! Pure aggregation of owner-dashboard statistics.

use bookwire_types::{Book, DashboardStats};

/// Compute dashboard statistics from the current collection and viewer count.
///
/// Stateless: the caller supplies everything. The most-favorited book is
/// found by a strictly-greater scan in insertion order, so ties keep the
/// earliest-created book and a collection where no book has any favorites
/// reports no most-favorited title at all.
pub fn compute_stats(books: &[Book], connected_owners: u32) -> DashboardStats {
    let mut most: Option<&Book> = None;
    for book in books {
        let best = most.map_or(0, Book::favorites_count);
        if book.favorites_count() > best {
            most = Some(book);
        }
    }

    DashboardStats {
        book_count: books.len(),
        connected_owners,
        most_favorited: most.map(|b| b.title.clone()),
        most_favorited_count: most.map_or(0, Book::favorites_count),
    }
}
