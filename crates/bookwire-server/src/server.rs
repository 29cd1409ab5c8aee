//! HTTP server lifecycle.
//!
//! [`start_server`] resolves the bind address from the application
//! configuration, binds the TCP listener, and serves the router until
//! the process is terminated. Failure to bind is the one fatal error at
//! the application layer; everything past that point is handled per
//! request.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::config::{AppConfig, ConfigError};
use crate::router::build_router;
use crate::state::AppState;

/// Errors that can end the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The configured host/port pair is not a valid socket address.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The listener could not bind. Fatal at startup.
    #[error("could not bind {addr}: {source}")]
    Bind {
        /// The address that failed to bind.
        addr: SocketAddr,
        /// The underlying I/O failure.
        source: std::io::Error,
    },

    /// A fatal I/O error while serving requests.
    #[error("serve failed: {0}")]
    Serve(#[from] std::io::Error),
}

/// Run the Bookwire server until the process is terminated.
///
/// # Errors
///
/// Returns [`ServerError::Config`] for an unresolvable bind address,
/// [`ServerError::Bind`] when the listener cannot bind, and
/// [`ServerError::Serve`] on a fatal I/O error while serving. All three
/// terminate the process from `main`.
pub async fn start_server(config: &AppConfig, state: Arc<AppState>) -> Result<(), ServerError> {
    let addr = config.bind_addr()?;

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    info!(%addr, books_file = %config.books_file.display(), "Bookwire server listening");

    axum::serve(listener, build_router(state)).await?;
    Ok(())
}
