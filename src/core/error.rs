//! Error types and handling for the MCP server.
//!
//! Remote API failures are not errors here: the executor reports them as
//! [`ApiResponse::Failure`](crate::core::api::ApiResponse) values. This type
//! covers startup failures.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error from the API client plumbing (e.g. building the HTTP client).
    #[error("API client error: {0}")]
    Api(#[from] crate::core::api::ApiError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::api::ApiError;

    #[test]
    fn test_error_display() {
        let err = Error::config("MCP_API_BASE_URL must be an http(s) URL");
        assert_eq!(
            err.to_string(),
            "Configuration error: MCP_API_BASE_URL must be an http(s) URL"
        );

        let err: Error = ApiError::network("connection refused").into();
        assert!(err.to_string().starts_with("API client error: "));
    }
}
