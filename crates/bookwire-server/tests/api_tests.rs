//! Integration tests for the Bookwire REST API and broadcast channel.
//!
//! Tests drive the Axum `Router` directly via `tower::ServiceExt` without
//! starting a TCP server, and observe broadcasts by subscribing to the
//! shared state's event channel before issuing requests.

#![allow(clippy::unwrap_used, clippy::panic)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use bookwire_core::BookRegistry;
use bookwire_server::router::build_router;
use bookwire_server::state::AppState;
use bookwire_store::{FileStore, WriteQueue};
use bookwire_types::ServerEvent;
use serde_json::{Value, json};
use tokio::sync::broadcast::error::TryRecvError;
use tower::ServiceExt;

fn make_test_app() -> (Router, Arc<AppState>, PathBuf) {
    let path = std::env::temp_dir().join(format!("bookwire-api-{}.json", uuid::Uuid::new_v4()));
    let store = FileStore::new(path.clone());
    let (writer, _handle) = WriteQueue::spawn(store);
    let state = Arc::new(AppState::new(BookRegistry::new(), writer));
    (build_router(state.clone()), state, path)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Create a book through the API and return its generated id.
async fn create_book(app: &Router, title: &str, author: &str) -> u64 {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/books",
            json!({"title": title, "author": author}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_to_json(response.into_body()).await["id"].as_u64().unwrap()
}

#[tokio::test]
async fn get_books_starts_empty() {
    let (app, _state, _path) = make_test_app();

    let response = app
        .oneshot(Request::get("/books").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_json(response.into_body()).await, json!([]));
}

#[tokio::test]
async fn post_creates_book_and_broadcasts_it() {
    let (app, state, _path) = make_test_app();
    let mut rx = state.subscribe();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/books",
            json!({"title": "Dune", "author": "Herbert"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_to_json(response.into_body()).await;
    assert!(created["id"].as_u64().is_some());
    assert_eq!(created["title"], "Dune");
    assert_eq!(created["author"], "Herbert");
    assert_eq!(created["favorites"], json!([]));

    // The subscribed client sees the same record, then fresh stats.
    match rx.recv().await.unwrap() {
        ServerEvent::BookAdded(book) => {
            assert_eq!(book.id.into_inner(), created["id"].as_u64().unwrap());
            assert_eq!(book.title, "Dune");
        }
        other => panic!("expected bookAdded, got {other:?}"),
    }
    match rx.recv().await.unwrap() {
        ServerEvent::DashboardStats(stats) => assert_eq!(stats.book_count, 1),
        other => panic!("expected dashboardStats, got {other:?}"),
    }

    // The list read includes the new record.
    let response = app
        .oneshot(Request::get("/books").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let books = body_to_json(response.into_body()).await;
    assert_eq!(books.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn post_with_missing_author_is_rejected_without_side_effects() {
    let (app, state, _path) = make_test_app();
    let mut rx = state.subscribe();

    let response = app
        .clone()
        .oneshot(json_request("POST", "/books", json!({"title": "Dune"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["error"], "Title and author are required");

    // No record added, no event broadcast.
    assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    let response = app
        .oneshot(Request::get("/books").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(body_to_json(response.into_body()).await, json!([]));
}

#[tokio::test]
async fn put_applies_partial_overwrite_semantics() {
    let (app, _state, _path) = make_test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/books",
            json!({
                "title": "Dune",
                "author": "Herbert",
                "readerName": "Paul",
                "returnDateTime": "2026-09-01T12:00:00Z"
            }),
        ))
        .await
        .unwrap();
    let id = body_to_json(response.into_body()).await["id"].as_u64().unwrap();

    // Only the title is supplied: author falls back, readerName and
    // returnDateTime are cleared.
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/books/{id}"),
            json!({"title": "Dune Messiah"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_to_json(response.into_body()).await;
    assert_eq!(updated["title"], "Dune Messiah");
    assert_eq!(updated["author"], "Herbert");
    assert_eq!(updated["readerName"], Value::Null);
    assert_eq!(updated["returnDateTime"], Value::Null);
}

#[tokio::test]
async fn put_unknown_id_is_not_found() {
    let (app, _state, _path) = make_test_app();

    let response = app
        .oneshot(json_request("PUT", "/books/999", json!({"title": "X"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["error"], "Book not found");
}

#[tokio::test]
async fn delete_removes_book_and_broadcasts_the_record() {
    let (app, state, _path) = make_test_app();
    let id = create_book(&app, "Dune", "Herbert").await;

    // Subscribe after creation so only delete events arrive.
    let mut rx = state.subscribe();

    let response = app
        .clone()
        .oneshot(
            Request::delete(format!("/books/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["message"], "Book deleted successfully");

    match rx.recv().await.unwrap() {
        ServerEvent::BookDeleted(book) => {
            assert_eq!(book.id.into_inner(), id);
            assert_eq!(book.title, "Dune");
        }
        other => panic!("expected bookDeleted, got {other:?}"),
    }

    let response = app
        .oneshot(Request::get("/books").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(body_to_json(response.into_body()).await, json!([]));
}

#[tokio::test]
async fn delete_unknown_id_is_not_found_with_no_broadcast() {
    let (app, state, _path) = make_test_app();
    let mut rx = state.subscribe();

    let response = app
        .oneshot(Request::delete("/books/424242").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["error"], "Book not found");
    assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn favorite_toggle_twice_returns_count_to_original() {
    let (app, state, _path) = make_test_app();
    let id = create_book(&app, "Dune", "Herbert").await;
    let mut rx = state.subscribe();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/books/{id}/favorite"),
            json!({"userId": "u1"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["favoritesCount"], 1);

    match rx.recv().await.unwrap() {
        ServerEvent::FavoriteUpdated(update) => {
            assert_eq!(update.book_id.into_inner(), id);
            assert_eq!(update.favorites_count, 1);
        }
        other => panic!("expected favoriteUpdated, got {other:?}"),
    }

    let response = app
        .oneshot(json_request(
            "POST",
            &format!("/books/{id}/favorite"),
            json!({"userId": "u1"}),
        ))
        .await
        .unwrap();
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["favoritesCount"], 0);
}

#[tokio::test]
async fn favorite_with_missing_user_id_is_rejected() {
    let (app, _state, _path) = make_test_app();
    let id = create_book(&app, "Dune", "Herbert").await;

    let response = app
        .oneshot(json_request(
            "POST",
            &format!("/books/{id}/favorite"),
            json!({}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["error"], "userId is required");
}

#[tokio::test]
async fn favorite_unknown_id_is_not_found() {
    let (app, _state, _path) = make_test_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/books/31337/favorite",
            json!({"userId": "u1"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn mutations_reach_the_store_file() {
    let (app, _state, path) = make_test_app();
    let id = create_book(&app, "Dune", "Herbert").await;

    // Persistence is asynchronous; poll the store until the write lands.
    let store = FileStore::new(path.clone());
    let mut persisted = Vec::new();
    for _ in 0..100 {
        persisted = store.load().await;
        if !persisted.is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    assert_eq!(persisted.len(), 1);
    let book = persisted.first().unwrap();
    assert_eq!(book.id.into_inner(), id);
    assert_eq!(book.title, "Dune");

    let _ = tokio::fs::remove_file(path).await;
}
