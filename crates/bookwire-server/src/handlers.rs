//! REST API endpoint handlers.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/books` | List all books (in-memory snapshot) |
//! | `POST` | `/books` | Create a book |
//! | `PUT` | `/books/:id` | Partially overwrite a book |
//! | `DELETE` | `/books/:id` | Delete a book |
//! | `POST` | `/books/:id/favorite` | Toggle a subscriber's favorite |
//!
//! Every mutating handler runs the same sequence: apply the mutation
//! under the registry write lock, enqueue a persistence snapshot while
//! the lock is still held, broadcast the specific event, then broadcast
//! fresh dashboard statistics. A failed validation or lookup produces
//! none of those side effects.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use bookwire_core::{BookPatch, NewBook};
use bookwire_types::{Book, BookId, FavoriteUpdate, ServerEvent};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response bodies
// ---------------------------------------------------------------------------

/// Body of `POST /books`.
///
/// Title and author are optional here so their absence surfaces as the
/// spec'd 400 validation error rather than a deserialization failure.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookRequest {
    /// Required title.
    pub title: Option<String>,
    /// Required author.
    pub author: Option<String>,
    /// Optional return-due timestamp.
    pub return_date_time: Option<DateTime<Utc>>,
    /// Optional current-reader name.
    pub reader_name: Option<String>,
}

/// Body of `PUT /books/:id`. All fields optional (partial overwrite).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookRequest {
    /// New title; absent or empty keeps the prior title.
    pub title: Option<String>,
    /// New author; absent or empty keeps the prior author.
    pub author: Option<String>,
    /// New return-due timestamp; absent clears.
    pub return_date_time: Option<DateTime<Utc>>,
    /// New reader name; absent clears.
    pub reader_name: Option<String>,
}

/// Body of `POST /books/:id/favorite`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRequest {
    /// The subscriber whose favorite membership is toggled.
    pub user_id: Option<String>,
}

/// Response body of `POST /books/:id/favorite`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteCountResponse {
    /// The book's favorite count after the toggle.
    pub favorites_count: usize,
}

/// Response body of `DELETE /books/:id`.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    /// Human-readable confirmation.
    pub message: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `GET /books` -- return the in-memory collection.
///
/// Reads bypass persistence entirely.
pub async fn list_books(State(state): State<Arc<AppState>>) -> Json<Vec<Book>> {
    let registry = state.registry.read().await;
    Json(registry.list().to_vec())
}

/// `POST /books` -- create a book.
pub async fn create_book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateBookRequest>,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    let input = NewBook {
        title: req.title.unwrap_or_default(),
        author: req.author.unwrap_or_default(),
        return_date_time: req.return_date_time,
        reader_name: req.reader_name,
    };

    let book = {
        let mut registry = state.registry.write().await;
        let book = registry.create(input)?;
        state.enqueue_snapshot(&registry);
        book
    };

    state.broadcast(ServerEvent::BookAdded(book.clone()));
    state.broadcast_stats().await;
    Ok((StatusCode::CREATED, Json(book)))
}

/// `PUT /books/:id` -- partially overwrite a book.
pub async fn update_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<BookId>,
    Json(req): Json<UpdateBookRequest>,
) -> Result<Json<Book>, ApiError> {
    let patch = BookPatch {
        title: req.title,
        author: req.author,
        return_date_time: req.return_date_time,
        reader_name: req.reader_name,
    };

    let book = {
        let mut registry = state.registry.write().await;
        let book = registry.update(id, patch)?;
        state.enqueue_snapshot(&registry);
        book
    };

    state.broadcast(ServerEvent::BookUpdated(book.clone()));
    state.broadcast_stats().await;
    Ok(Json(book))
}

/// `DELETE /books/:id` -- delete a book.
///
/// The broadcast carries the full removed record; the HTTP response is a
/// confirmation message.
pub async fn delete_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<BookId>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let book = {
        let mut registry = state.registry.write().await;
        let book = registry.remove(id)?;
        state.enqueue_snapshot(&registry);
        book
    };

    state.broadcast(ServerEvent::BookDeleted(book));
    state.broadcast_stats().await;
    Ok(Json(DeleteResponse {
        message: String::from("Book deleted successfully"),
    }))
}

/// `POST /books/:id/favorite` -- toggle a subscriber's favorite.
pub async fn toggle_favorite(
    State(state): State<Arc<AppState>>,
    Path(id): Path<BookId>,
    Json(req): Json<FavoriteRequest>,
) -> Result<Json<FavoriteCountResponse>, ApiError> {
    let user_id = req
        .user_id
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ApiError::Validation(String::from("userId is required")))?;

    let favorites_count = {
        let mut registry = state.registry.write().await;
        let count = registry.toggle_favorite(id, &user_id)?;
        state.enqueue_snapshot(&registry);
        count
    };

    state.broadcast(ServerEvent::FavoriteUpdated(FavoriteUpdate {
        book_id: id,
        favorites_count,
    }));
    state.broadcast_stats().await;
    Ok(Json(FavoriteCountResponse { favorites_count }))
}
