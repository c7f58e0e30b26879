//! Common error types for Herodex.

use thiserror::Error;

/// Top-level error type for Herodex operations.
///
/// Every variant carries a message describing what went wrong. Errors
/// propagate unchanged from the upstream client through the catalog
/// service; translation to an HTTP status happens only at the server
/// boundary.
#[derive(Debug, Error)]
pub enum Error {
    /// Network or connection failure talking to the upstream source.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Malformed upstream payload.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Invalid input provided by a caller.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Upstream confirms the resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Upstream responded with a non-success status other than 404.
    #[error("Bad gateway: {0}")]
    BadGateway(String),
}

/// Result type alias using the common Error.
pub type Result<T> = std::result::Result<T, Error>;
