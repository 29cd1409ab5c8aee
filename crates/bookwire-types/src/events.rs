//! Typed `WebSocket` events.
//!
//! Server-to-client frames are a JSON object with an `event` tag and a
//! `data` payload, e.g. `{"event": "bookAdded", "data": {...}}`. The tag
//! names are part of the public wire contract and must not change.
//!
//! Client-to-server frames carry only a tag: `{"event": "ownerJoinDashboard"}`.

use serde::{Deserialize, Serialize};

use crate::book::Book;
use crate::ids::BookId;
use crate::presence::Presence;
use crate::stats::DashboardStats;

/// Payload of a `favoriteUpdated` event.
///
/// Deliberately omits the full record: favorite toggles are frequent and
/// clients only need the id and the new count to update their views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteUpdate {
    /// The book whose favorites changed.
    pub book_id: BookId,
    /// The new favorite count for that book.
    pub favorites_count: usize,
}

/// Every event the server can broadcast to subscribers.
///
/// One broadcast channel carries all of these; every connected subscriber
/// receives every event, including `dashboardStats` (readers simply ignore
/// it -- the audience is intentionally not narrowed to owners).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    /// A book was created; carries the full new record.
    BookAdded(Book),
    /// A book was updated; carries the full updated record.
    BookUpdated(Book),
    /// A book was deleted; carries the full removed record.
    BookDeleted(Book),
    /// A favorite was toggled; carries only the id and new count.
    FavoriteUpdated(FavoriteUpdate),
    /// The presence roster changed; carries the full roster.
    UserStatus(Vec<Presence>),
    /// Fresh dashboard statistics after a mutation or viewer change.
    DashboardStats(DashboardStats),
}

/// Signals a subscriber can send to the server over the `WebSocket`.
///
/// Malformed or unrecognized frames are dropped silently; the realtime
/// channel has no error-reporting path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum ClientEvent {
    /// The subscriber opened the owner dashboard view.
    OwnerJoinDashboard,
    /// The subscriber left the owner dashboard view.
    OwnerLeaveDashboard,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::ids::ConnectionId;
    use crate::presence::Role;

    fn sample_book() -> Book {
        Book {
            id: BookId(7),
            title: String::from("Dune"),
            author: String::from("Herbert"),
            return_date_time: None,
            reader_name: None,
            favorites: Vec::new(),
        }
    }

    #[test]
    fn server_events_use_contract_tag_names() {
        let cases = [
            (ServerEvent::BookAdded(sample_book()), "bookAdded"),
            (ServerEvent::BookUpdated(sample_book()), "bookUpdated"),
            (ServerEvent::BookDeleted(sample_book()), "bookDeleted"),
            (
                ServerEvent::FavoriteUpdated(FavoriteUpdate {
                    book_id: BookId(7),
                    favorites_count: 1,
                }),
                "favoriteUpdated",
            ),
            (ServerEvent::UserStatus(Vec::new()), "userStatus"),
            (
                ServerEvent::DashboardStats(DashboardStats {
                    book_count: 0,
                    connected_owners: 0,
                    most_favorited: None,
                    most_favorited_count: 0,
                }),
                "dashboardStats",
            ),
        ];

        for (event, tag) in cases {
            let json = serde_json::to_value(&event).unwrap();
            assert_eq!(json["event"], tag);
        }
    }

    #[test]
    fn favorite_update_payload_shape() {
        let event = ServerEvent::FavoriteUpdated(FavoriteUpdate {
            book_id: BookId(1234),
            favorites_count: 2,
        });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["data"]["bookId"], 1234);
        assert_eq!(json["data"]["favoritesCount"], 2);
    }

    #[test]
    fn user_status_carries_presence_array() {
        let event = ServerEvent::UserStatus(vec![Presence {
            id: String::from("u1"),
            role: Role::Owner,
            connection_id: ConnectionId::new(),
        }]);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["data"][0]["id"], "u1");
        assert_eq!(json["data"][0]["role"], "owner");
    }

    #[test]
    fn client_events_parse_from_tag_only_frames() {
        let join: ClientEvent =
            serde_json::from_str(r#"{"event": "ownerJoinDashboard"}"#).unwrap();
        assert_eq!(join, ClientEvent::OwnerJoinDashboard);

        let leave: ClientEvent =
            serde_json::from_str(r#"{"event": "ownerLeaveDashboard"}"#).unwrap();
        assert_eq!(leave, ClientEvent::OwnerLeaveDashboard);

        assert!(serde_json::from_str::<ClientEvent>(r#"{"event": "selfDestruct"}"#).is_err());
    }
}
