//! Transport configuration types.

use serde::{Deserialize, Serialize};

/// Which MCP transport to serve on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// Standard input/output transport (default for MCP).
    #[cfg(feature = "stdio")]
    Stdio,

    /// TCP socket transport with JSON-RPC messages.
    #[cfg(feature = "tcp")]
    Tcp(TcpConfig),
}

/// TCP transport configuration.
#[cfg(feature = "tcp")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TcpConfig {
    /// Port number to listen on.
    pub port: u16,

    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,
}

#[cfg(feature = "tcp")]
fn default_host() -> String {
    "127.0.0.1".to_string()
}

#[cfg(feature = "tcp")]
impl Default for TcpConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: default_host(),
        }
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        #[cfg(feature = "stdio")]
        {
            Self::Stdio
        }

        #[cfg(all(not(feature = "stdio"), feature = "tcp"))]
        {
            Self::Tcp(TcpConfig::default())
        }

        #[cfg(not(any(feature = "stdio", feature = "tcp")))]
        {
            compile_error!("At least one transport feature must be enabled: stdio or tcp")
        }
    }
}

impl TransportConfig {
    /// Create a TCP transport config.
    #[cfg(feature = "tcp")]
    pub fn tcp(port: u16, host: impl Into<String>) -> Self {
        Self::Tcp(TcpConfig {
            port,
            host: host.into(),
        })
    }

    /// Load transport config from `MCP_TRANSPORT`, `MCP_TCP_PORT`, `MCP_TCP_HOST`.
    pub fn from_env() -> Self {
        let transport = std::env::var("MCP_TRANSPORT")
            .unwrap_or_default()
            .to_lowercase();

        match transport.as_str() {
            #[cfg(feature = "tcp")]
            "tcp" => {
                let port = std::env::var("MCP_TCP_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(3000);
                let host = std::env::var("MCP_TCP_HOST").unwrap_or_else(|_| default_host());
                Self::Tcp(TcpConfig { port, host })
            }
            _ => Self::default(),
        }
    }

    /// Get a description of this transport for logging.
    pub fn description(&self) -> String {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => "STDIO (standard MCP mode)".to_string(),
            #[cfg(feature = "tcp")]
            Self::Tcp(cfg) => format!("TCP on {}:{}", cfg.host, cfg.port),
        }
    }
}
