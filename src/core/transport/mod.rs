//! MCP transports the server can listen on.
//!
//! - **STDIO**: standard input/output, the default for MCP hosts - feature: `stdio`
//! - **TCP**: line-delimited JSON-RPC over raw sockets - feature: `tcp`
//!
//! Not to be confused with [`crate::core::api::transport`], which is the
//! outbound HTTP seam towards the e-invoicing API.

mod config;
mod error;
mod service;

#[cfg(feature = "tcp")]
pub mod tcp;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "tcp")]
pub use config::TcpConfig;
