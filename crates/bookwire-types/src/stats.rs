//! Derived owner-dashboard statistics.

use serde::{Deserialize, Serialize};

/// Aggregate statistics pushed in `dashboardStats` events.
///
/// Recomputed from scratch after every mutation and every dashboard
/// join/leave; nothing here is stored. `most_favorited` is `None` when the
/// collection is empty or no book has any favorites yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Total number of books in the registry.
    pub book_count: usize,
    /// Connections currently viewing the owner dashboard.
    pub connected_owners: u32,
    /// Title of the most-favorited book, if any book has favorites.
    pub most_favorited: Option<String>,
    /// Favorite count of the most-favorited book (0 when none).
    pub most_favorited_count: usize,
}
