//! Crate-wide error types.
//!
//! Fatal startup errors only; per-request failures are expressed as HTTP
//! responses and never surface here.

use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can abort the server before or during startup.
#[derive(Debug, Error)]
pub enum Error {
    /// The configured root directory does not exist or is not a directory.
    #[error("root directory not found or not a directory: {}", .0.display())]
    RootDirectory(PathBuf),

    /// The primary port and every configured fallback port failed to bind.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    /// The configured host/port pair does not form a valid socket address.
    #[error("invalid listen address '{0}'")]
    Address(String),

    /// Configuration file or environment override could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// I/O error outside the request path (runtime setup, listener).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
