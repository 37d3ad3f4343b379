//! Tool-specific error types.

use thiserror::Error;

/// Errors a tool raises before any request reaches the API.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Invalid arguments were provided to the tool.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// A local file was rejected before upload.
    #[error("Upload rejected: {0}")]
    UploadRejected(#[from] crate::core::security::PathSecurityError),
}

impl ToolError {
    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }
}
