//! Transport error types.

use thiserror::Error;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Failures that stop a transport from serving.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The TCP listener could not bind.
    #[error("Failed to bind to {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// The MCP handshake with the client failed.
    #[error("Server initialization error: {0}")]
    Init(String),

    /// The running service ended with an error.
    #[error("Service error: {0}")]
    Service(String),
}

impl TransportError {
    pub fn bind(address: impl Into<String>, source: std::io::Error) -> Self {
        Self::Bind {
            address: address.into(),
            source,
        }
    }

    pub fn init(msg: impl Into<String>) -> Self {
        Self::Init(msg.into())
    }

    pub fn service(msg: impl Into<String>) -> Self {
        Self::Service(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_error_names_address() {
        let err = TransportError::bind(
            "127.0.0.1:3100",
            std::io::Error::new(std::io::ErrorKind::AddrInUse, "address in use"),
        );
        assert_eq!(
            err.to_string(),
            "Failed to bind to 127.0.0.1:3100: address in use"
        );
    }
}
