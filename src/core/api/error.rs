//! API client error types.
//!
//! These never reach tool callers directly: the executor folds every one of
//! them into an [`ApiResponse::Failure`](super::ApiResponse).

use std::path::PathBuf;

use thiserror::Error;

/// Result type for API client plumbing.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors raised while building or sending a request to the remote API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, TLS, reset...).
    #[error("Network error: {0}")]
    Network(String),

    /// The file attached to a multipart upload could not be read.
    #[error("Failed to read upload file '{}': {source}", path.display())]
    UploadRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    /// The request could not be encoded (query string or JSON body).
    #[error("Failed to encode request: {0}")]
    Encode(String),
}

impl ApiError {
    /// Create a network error.
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create an upload read error.
    pub fn upload_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::UploadRead {
            path: path.into(),
            source,
        }
    }

    /// Create an encoding error.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::ClientBuild(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_error_message() {
        let err = ApiError::network("connection refused");
        assert_eq!(err.to_string(), "Network error: connection refused");
    }

    #[test]
    fn test_upload_read_message_names_path() {
        let err = ApiError::upload_read(
            "/tmp/missing.xml",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/tmp/missing.xml"));
        assert!(msg.starts_with("Failed to read upload file"));
    }
}
