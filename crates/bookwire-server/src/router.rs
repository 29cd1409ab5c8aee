//! Axum router construction.
//!
//! Assembles the REST routes and the `WebSocket` endpoint into a single
//! [`Router`] with CORS middleware enabled for cross-origin dashboard
//! access.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the complete Axum router for the Bookwire server.
///
/// Routes:
/// - `GET /books` -- list books
/// - `POST /books` -- create a book
/// - `PUT /books/{id}` -- update a book
/// - `DELETE /books/{id}` -- delete a book
/// - `POST /books/{id}/favorite` -- toggle a favorite
/// - `GET /ws` -- realtime event stream
///
/// CORS allows any origin for the demo frontend. In production this
/// should be restricted.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/books", get(handlers::list_books).post(handlers::create_book))
        .route(
            "/books/{id}",
            put(handlers::update_book).delete(handlers::delete_book),
        )
        .route("/books/{id}/favorite", post(handlers::toggle_favorite))
        .route("/ws", get(ws::ws_connect))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
