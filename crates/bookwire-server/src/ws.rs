//! `WebSocket` handler for the realtime broadcast channel.
//!
//! Clients connect to `GET /ws?userId=...&role=...` and receive every
//! [`ServerEvent`] as a JSON text frame. The handler subscribes to the
//! broadcast channel, registers the connection in the presence roster,
//! and forwards events until the client disconnects.
//!
//! Client-to-server frames are limited to the two dashboard signals
//! (`ownerJoinDashboard` / `ownerLeaveDashboard`); anything unparseable
//! is dropped silently -- the realtime channel has no error-reporting
//! path.
//!
//! If a client falls behind, lagged events are skipped and the client
//! resumes from the most recent one.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Query, State, WebSocketUpgrade};
use axum::response::IntoResponse;
use bookwire_types::{ClientEvent, ConnectionId, Presence, Role, ServerEvent};
use rand::Rng;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::state::AppState;

/// Connection-time query parameters.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectQuery {
    /// Subscriber identifier; generated if absent.
    pub user_id: Option<String>,
    /// Declared role; defaults to reader.
    pub role: Option<String>,
}

/// Validated per-connection context, populated once at connect time.
///
/// Replaces ad hoc fallback expressions in handlers: the defaults (a
/// generated `user_NNNN` identifier, reader role) are applied here and
/// nowhere else.
#[derive(Debug, Clone)]
pub struct ConnectionContext {
    /// Subscriber identifier (client-supplied or generated).
    pub user_id: String,
    /// Declared role.
    pub role: Role,
    /// Fresh handle for this connection.
    pub connection_id: ConnectionId,
}

impl ConnectionContext {
    /// Build a context from connection query parameters.
    pub fn from_query(query: &ConnectQuery) -> Self {
        let user_id = query
            .user_id
            .clone()
            .filter(|id| !id.is_empty())
            .unwrap_or_else(generated_user_id);

        Self {
            user_id,
            role: Role::from_query(query.role.as_deref()),
            connection_id: ConnectionId::new(),
        }
    }
}

/// Generate a fallback subscriber identifier for anonymous connections.
fn generated_user_id() -> String {
    let n = rand::rng().random_range(0..10_000);
    format!("user_{n}")
}

/// Upgrade an HTTP request to a `WebSocket` connection.
///
/// # Route
///
/// `GET /ws`
pub async fn ws_connect(
    ws: WebSocketUpgrade,
    Query(query): Query<ConnectQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let ctx = ConnectionContext::from_query(&query);
    ws.on_upgrade(move |socket| handle_socket(socket, state, ctx))
}

/// Handle the `WebSocket` lifecycle for one subscriber.
async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>, ctx: ConnectionContext) {
    debug!(user_id = ctx.user_id, role = %ctx.role, connection_id = %ctx.connection_id, "subscriber connected");

    // Subscribe before joining the roster so this client also receives
    // its own userStatus broadcast.
    let mut rx = state.subscribe();

    {
        let mut roster = state.roster.write().await;
        roster.join(Presence {
            id: ctx.user_id.clone(),
            role: ctx.role,
            connection_id: ctx.connection_id,
        });
        state.broadcast(ServerEvent::UserStatus(roster.users().to_vec()));
    }

    loop {
        tokio::select! {
            // Forward broadcast events to this client.
            result = rx.recv() => {
                match result {
                    Ok(event) => {
                        let json = match serde_json::to_string(&event) {
                            Ok(j) => j,
                            Err(e) => {
                                warn!("failed to serialize server event: {e}");
                                continue;
                            }
                        };
                        if socket.send(Message::Text(json.into())).await.is_err() {
                            debug!("subscriber disconnected (send failed)");
                            break;
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                        debug!(skipped = n, "subscriber lagged, skipping ahead");
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => {
                        debug!("broadcast channel closed, shutting down socket");
                        break;
                    }
                }
            }
            // Handle frames from the client.
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        if let Ok(event) = serde_json::from_str::<ClientEvent>(&text) {
                            handle_client_event(&state, event).await;
                        }
                        // Unrecognized frames are dropped silently.
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        break;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Err(e)) => {
                        debug!("websocket error: {e}");
                        break;
                    }
                    _ => {
                        // Ignore binary and pong frames.
                    }
                }
            }
        }
    }

    // Disconnect: drop the presence entry and tell everyone. The
    // dashboard-viewer counter is left alone -- only an explicit leave
    // signal decrements it.
    {
        let mut roster = state.roster.write().await;
        roster.leave(ctx.connection_id);
        state.broadcast(ServerEvent::UserStatus(roster.users().to_vec()));
    }

    debug!(user_id = ctx.user_id, connection_id = %ctx.connection_id, "subscriber disconnected");
}

/// Apply a dashboard join/leave signal and rebroadcast statistics.
async fn handle_client_event(state: &AppState, event: ClientEvent) {
    match event {
        ClientEvent::OwnerJoinDashboard => {
            state.roster.write().await.enter_dashboard();
        }
        ClientEvent::OwnerLeaveDashboard => {
            state.roster.write().await.leave_dashboard();
        }
    }
    state.broadcast_stats().await;
}
