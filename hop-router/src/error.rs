//! Error types for hop-router

use std::io;
use thiserror::Error;

/// Result type alias for router operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors shared by router backends and the callbacks they delegate to
///
/// Routers never construct these themselves when applying configuration:
/// whatever a backend or callback returns is passed through as-is.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error from underlying system calls
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid network prefix
    #[error("invalid network prefix: {0}")]
    InvalidPrefix(String),

    /// Permission denied (missing root / CAP_NET_ADMIN / Administrator)
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Operation or backend not supported on this platform
    #[error("operation not supported: {0}")]
    NotSupported(String),

    /// Route management error
    #[error("route error: {0}")]
    Route(String),

    /// Error reported by the host environment owning the network stack
    #[error("host error: {0}")]
    Host(String),
}

impl Error {
    /// Check if the error is a permission-related error
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Error::PermissionDenied(_))
            || matches!(self, Error::Io(e) if e.kind() == io::ErrorKind::PermissionDenied)
    }

    /// Check if the error means the backend cannot run here
    pub fn is_not_supported(&self) -> bool {
        matches!(self, Error::NotSupported(_))
            || matches!(self, Error::Io(e) if e.kind() == io::ErrorKind::Unsupported)
    }
}
