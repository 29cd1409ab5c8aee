//! Shared application state for the Bookwire server.
//!
//! [`AppState`] owns everything a handler needs: the registry behind a
//! read-write lock, the presence roster, the broadcast sender for server
//! events, and the write-queue handle for persistence. It is wrapped in
//! [`Arc`] and injected via Axum's `State` extractor -- there are no
//! hidden globals.

use std::sync::Arc;

use bookwire_core::{BookRegistry, compute_stats};
use bookwire_store::WriteQueue;
use bookwire_types::{ConnectionId, Presence, ServerEvent};
use tokio::sync::{RwLock, broadcast};

/// Capacity of the broadcast channel for server events.
///
/// A subscriber that falls behind by more than this many messages
/// receives a [`broadcast::error::RecvError::Lagged`] and skips to the
/// newest event.
const BROADCAST_CAPACITY: usize = 256;

/// Transient, connection-scoped presence state.
///
/// Tracks who is connected and how many connections currently have the
/// owner dashboard open. Never persisted; it empties naturally as
/// connections close.
#[derive(Debug, Clone, Default)]
pub struct PresenceRoster {
    users: Vec<Presence>,
    dashboard_viewers: u32,
}

impl PresenceRoster {
    /// Create an empty roster.
    pub const fn new() -> Self {
        Self {
            users: Vec::new(),
            dashboard_viewers: 0,
        }
    }

    /// Add a subscriber on connect.
    pub fn join(&mut self, presence: Presence) {
        self.users.push(presence);
    }

    /// Remove a subscriber by connection handle on disconnect.
    pub fn leave(&mut self, connection_id: ConnectionId) {
        self.users.retain(|u| u.connection_id != connection_id);
    }

    /// The currently connected subscribers, connection order.
    pub fn users(&self) -> &[Presence] {
        &self.users
    }

    /// Record a subscriber entering the owner dashboard view.
    pub const fn enter_dashboard(&mut self) {
        self.dashboard_viewers = self.dashboard_viewers.saturating_add(1);
    }

    /// Record a subscriber leaving the owner dashboard view.
    ///
    /// Floors at zero: a stray leave signal never drives the counter
    /// negative.
    pub const fn leave_dashboard(&mut self) {
        self.dashboard_viewers = self.dashboard_viewers.saturating_sub(1);
    }

    /// Number of connections currently viewing the owner dashboard.
    pub const fn dashboard_viewers(&self) -> u32 {
        self.dashboard_viewers
    }
}

/// Shared state for the Axum application.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Broadcast sender for server events.
    tx: broadcast::Sender<ServerEvent>,
    /// The book registry, the sole source of truth while running.
    pub registry: Arc<RwLock<BookRegistry>>,
    /// Connected-subscriber presence and dashboard-viewer count.
    pub roster: Arc<RwLock<PresenceRoster>>,
    /// Handle to the serialized persistence queue.
    writer: WriteQueue,
}

impl AppState {
    /// Create application state around a loaded registry and write queue.
    pub fn new(registry: BookRegistry, writer: WriteQueue) -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            tx,
            registry: Arc::new(RwLock::new(registry)),
            roster: Arc::new(RwLock::new(PresenceRoster::new())),
            writer,
        }
    }

    /// Subscribe to the server event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.tx.subscribe()
    }

    /// Broadcast an event to all connected subscribers.
    ///
    /// Returns the number of receivers that got the event. Zero receivers
    /// is not an error -- it just means no `WebSocket` client is connected.
    pub fn broadcast(&self, event: ServerEvent) -> usize {
        self.tx.send(event).unwrap_or(0)
    }

    /// Enqueue a snapshot of the given registry for persistence.
    ///
    /// Must be called while the registry write lock is still held so the
    /// queue receives snapshots in mutation order.
    pub fn enqueue_snapshot(&self, registry: &BookRegistry) {
        self.writer.enqueue(registry.snapshot());
    }

    /// Recompute dashboard statistics and broadcast them to everyone.
    ///
    /// Deliberately broadcast to all subscribers, not just owners --
    /// reader clients simply ignore the event.
    pub async fn broadcast_stats(&self) {
        let stats = {
            let registry = self.registry.read().await;
            let roster = self.roster.read().await;
            compute_stats(registry.list(), roster.dashboard_viewers())
        };
        self.broadcast(ServerEvent::DashboardStats(stats));
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]

    use super::*;
    use bookwire_store::FileStore;
    use bookwire_types::Role;

    fn test_state() -> AppState {
        let store = FileStore::new(std::env::temp_dir().join("bookwire-state-test.json"));
        let (writer, _handle) = WriteQueue::spawn(store);
        AppState::new(BookRegistry::new(), writer)
    }

    fn presence(id: &str, role: Role) -> Presence {
        Presence {
            id: id.to_owned(),
            role,
            connection_id: ConnectionId::new(),
        }
    }

    #[test]
    fn roster_join_and_leave_track_connections() {
        let mut roster = PresenceRoster::new();
        let reader = presence("u1", Role::Reader);
        let owner = presence("u2", Role::Owner);
        let reader_conn = reader.connection_id;

        roster.join(reader);
        roster.join(owner);
        assert_eq!(roster.users().len(), 2);

        roster.leave(reader_conn);
        assert_eq!(roster.users().len(), 1);
        assert_eq!(roster.users().first().unwrap().id, "u2");
    }

    #[test]
    fn dashboard_viewer_count_floors_at_zero() {
        let mut roster = PresenceRoster::new();
        roster.leave_dashboard();
        assert_eq!(roster.dashboard_viewers(), 0);

        roster.enter_dashboard();
        roster.enter_dashboard();
        roster.leave_dashboard();
        assert_eq!(roster.dashboard_viewers(), 1);
    }

    #[tokio::test]
    async fn broadcast_stats_reflects_registry_and_viewers() {
        let state = test_state();
        let mut rx = state.subscribe();

        state.roster.write().await.enter_dashboard();
        state.broadcast_stats().await;

        match rx.recv().await.unwrap() {
            ServerEvent::DashboardStats(stats) => {
                assert_eq!(stats.book_count, 0);
                assert_eq!(stats.connected_owners, 1);
                assert!(stats.most_favorited.is_none());
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn broadcast_without_subscribers_reports_zero_receivers() {
        let state = test_state();
        assert_eq!(state.broadcast(ServerEvent::UserStatus(Vec::new())), 0);
    }
}
