//! Bookwire server binary.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from environment variables
//! 3. Load the book collection from the JSON store file (missing or
//!    corrupt file starts an empty collection)
//! 4. Spawn the serialized persistence write queue
//! 5. Build the shared application state
//! 6. Serve HTTP + `WebSocket` until terminated (bind failure is fatal)

use std::sync::Arc;

use bookwire_core::BookRegistry;
use bookwire_server::config::AppConfig;
use bookwire_server::server::start_server;
use bookwire_server::state::AppState;
use bookwire_store::{FileStore, WriteQueue};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the network listener
/// cannot bind; both terminate the process.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("bookwire starting");

    // Load configuration from the environment.
    let config = AppConfig::from_env()?;
    info!(
        host = config.host,
        port = config.port,
        books_file = %config.books_file.display(),
        "configuration loaded"
    );

    // Load the persisted collection (fail-soft: empty on any problem).
    let store = FileStore::new(config.books_file.clone());
    let registry = BookRegistry::from_books(store.load().await);
    info!(count = registry.len(), "registry initialized");

    // Spawn the serialized persistence writer.
    let (writer, _writer_handle) = WriteQueue::spawn(store);

    // Build shared state and serve.
    let state = Arc::new(AppState::new(registry, writer));
    start_server(&config, state).await?;
    Ok(())
}
