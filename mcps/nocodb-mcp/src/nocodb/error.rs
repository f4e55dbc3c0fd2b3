//! Error types for NocoDB API operations

use thiserror::Error;

/// Errors that can occur when talking to the NocoDB API
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NocoDbError {
    /// Transport or protocol failure: network, TLS, timeout, non-2xx status,
    /// or an undecodable response body
    #[error("Request failed: {0}")]
    Request(String),

    /// `create_view` was asked for a view type NocoDB has no endpoint for
    #[error("Unsupported view type: {0}")]
    UnsupportedViewType(String),

    /// The HTTP client could not be built from the connection settings
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

impl NocoDbError {
    pub(crate) fn request(e: impl std::fmt::Display) -> Self {
        NocoDbError::Request(e.to_string())
    }
}

impl From<reqwest::Error> for NocoDbError {
    fn from(e: reqwest::Error) -> Self {
        NocoDbError::request(e)
    }
}

/// Result type alias for NocoDB operations
pub type NocoDbResult<T> = Result<T, NocoDbError>;
