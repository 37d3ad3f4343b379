//! E-invoicing MCP Server Library
//!
//! Exposes a remote e-invoicing REST API to MCP clients as tools. Every tool
//! goes through one authenticated request executor that holds the session,
//! attaches credentials and tenant scoping, refreshes expired tokens once and
//! turns every outcome into a success/failure value.
//!
//! # Architecture
//!
//! - **core**: configuration, errors, the MCP server, its transports and the
//!   API client (`core::api`)
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: MCP tools wrapping API operations
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use einvoice_mcp_server::{ApiClient, Config, McpServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let client = Arc::new(ApiClient::from_config(&config.api)?);
//!     let server = McpServer::new(config, client);
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{ApiClient, Config, Error, McpServer, Result};
