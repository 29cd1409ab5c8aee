//! Application configuration loaded from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Complete application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host address to bind (`BOOKWIRE_HOST`, default `0.0.0.0`).
    pub host: String,
    /// TCP port to listen on (`BOOKWIRE_PORT`, default `4000`).
    pub port: u16,
    /// Path of the JSON store file (`BOOKWIRE_BOOKS_FILE`, default
    /// `books.json` in the working directory).
    pub books_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 4000,
            books_file: PathBuf::from("books.json"),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Every variable is optional; absent values take the documented
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPort`] if `BOOKWIRE_PORT` is set but
    /// not a valid port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = std::env::var("BOOKWIRE_HOST").unwrap_or(defaults.host);

        let port = match std::env::var("BOOKWIRE_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|source| ConfigError::InvalidPort { value: raw, source })?,
            Err(_) => defaults.port,
        };

        let books_file = std::env::var("BOOKWIRE_BOOKS_FILE")
            .map_or(defaults.books_file, PathBuf::from);

        Ok(Self {
            host,
            port,
            books_file,
        })
    }

    /// Resolve the socket address to bind from the host and port.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBindAddr`] if the pair does not form
    /// a valid socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse()
            .map_err(|source| ConfigError::InvalidBindAddr { addr: raw, source })
    }
}

/// Errors that can occur while loading or resolving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `BOOKWIRE_PORT` was set but could not be parsed as a port number.
    #[error("invalid BOOKWIRE_PORT value {value}: {source}")]
    InvalidPort {
        /// The raw environment value.
        value: String,
        /// The underlying parse failure.
        source: std::num::ParseIntError,
    },

    /// The host/port pair does not form a valid socket address.
    #[error("invalid bind address {addr}: {source}")]
    InvalidBindAddr {
        /// The raw `host:port` string.
        addr: String,
        /// The underlying parse failure.
        source: std::net::AddrParseError,
    },
}
